mod api;
mod config;
mod error;
mod render;
mod session;
mod storyboard;

use anyhow::Context;
use api::GeminiClient;
use clap::Parser;
use error::Result;
use render::StoryboardRenderer;
use session::SessionContext;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "video-director")]
#[command(about = "Agentic video storyboard planning CLI powered by Gemini", long_about = None)]
struct Args {
    /// Topic to turn into a storyboard (omit for interactive mode)
    #[arg(short, long)]
    prompt: Option<String>,

    /// Read the topic from a text file
    #[arg(short, long)]
    file: Option<String>,

    /// Gemini model name
    #[arg(short, long, default_value = api::DEFAULT_MODEL)]
    model: String,

    /// Gemini API key (falls back to GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Directory probed for a previously generated preview video
    #[arg(short = 'w', long, default_value = ".")]
    work_dir: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    // 加载环境变量
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // 凭证缺失时在任何网络调用之前终止
    let api_key = match config::resolve_api_key(args.api_key) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Warning: {}", e.user_message());
            std::process::exit(1);
        }
    };

    let client = GeminiClient::new(api_key, args.model)
        .context("Failed to create Gemini client")?;
    let renderer = StoryboardRenderer::new(args.work_dir);
    let mut ctx = SessionContext::new();

    // 获取输入：单次提交或进入交互模式
    let one_shot = if let Some(text) = args.prompt {
        Some(text)
    } else if let Some(file_path) = args.file {
        let text = tokio::fs::read_to_string(&file_path)
            .await
            .context(format!("Failed to read file: {}", file_path))?;
        Some(text)
    } else {
        None
    };

    match one_shot {
        Some(prompt) => {
            let prompt = prompt.trim().to_string();
            if prompt.is_empty() {
                eprintln!("Error: prompt is empty");
                std::process::exit(1);
            }
            if let Err(e) = handle_submission(&mut ctx, &client, &renderer, &prompt).await {
                error!("Storyboard generation failed: {}", e);
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        }
        None => run_chat_loop(&mut ctx, &client, &renderer).await?,
    }

    Ok(())
}

/// 交互模式：逐行读取主题，空行直接跳过，不发请求
async fn run_chat_loop(
    ctx: &mut SessionContext,
    client: &GeminiClient,
    renderer: &StoryboardRenderer,
) -> anyhow::Result<()> {
    info!("Interactive mode, model: {}", client.model());
    println!("I want to create a video about... (empty line to skip, 'exit' to quit)");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"topic> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let prompt = line.trim();
        if prompt.is_empty() {
            continue;
        }
        if prompt == "exit" || prompt == "quit" {
            break;
        }

        // 单个错误不终止会话，用户重新提交即可
        if let Err(e) = handle_submission(ctx, client, renderer, prompt).await {
            error!("Storyboard generation failed: {}", e);
            eprintln!("{}", e.user_message());
        }
    }

    info!("Session ended with {} transcript entries", ctx.messages().len());
    Ok(())
}

/// 处理一次提交：调用模型、渲染结果、固定追加一条会话摘要
async fn handle_submission(
    ctx: &mut SessionContext,
    client: &GeminiClient,
    renderer: &StoryboardRenderer,
    prompt: &str,
) -> Result<()> {
    ctx.push_user(prompt);

    let outcome = client.generate_storyboard(prompt).await?;
    renderer.render(&outcome).await?;
    ctx.record_outcome(&outcome);

    Ok(())
}
