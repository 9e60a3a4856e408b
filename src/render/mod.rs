use crate::error::{DirectorError, Result};
use crate::storyboard::{Scene, StoryboardOutcome};
use std::path::{Path, PathBuf};
use tracing::info;

/// 本地“已生成”视频的固定文件名，存在则优先播放
const GENERATED_VIDEO_FILE: &str = "generated_video.mp4";
/// 本地文件缺失时回退的样片地址
const STOCK_VIDEO_URL: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

const COLUMN_WIDTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
    Local(PathBuf),
    Remote(String),
}

pub struct StoryboardRenderer {
    work_dir: String,
}

impl StoryboardRenderer {
    pub fn new(work_dir: String) -> Self {
        Self { work_dir }
    }

    /// 渲染一次提交的结果：分镜卡片或原文回退
    pub async fn render(&self, outcome: &StoryboardOutcome) -> Result<()> {
        match outcome {
            StoryboardOutcome::Scenes(scenes) => {
                println!("Storyboard generated successfully\n");
                println!("{}", layout_columns(scenes)?);

                let preview = self.resolve_preview_source().await;
                match &preview {
                    PreviewSource::Local(path) => {
                        info!("Using local preview: {}", path.display());
                        println!("Preview: {}", path.display());
                    }
                    PreviewSource::Remote(url) => {
                        info!("Local preview not found, falling back to stock clip");
                        println!("Preview (stock): {}", url);
                    }
                }
            }
            StoryboardOutcome::RawText(text) => {
                println!("{}", text);
            }
        }
        Ok(())
    }

    /// 播放前探测工作目录里的固定文件名，缺失则回退远端样片
    pub async fn resolve_preview_source(&self) -> PreviewSource {
        let candidate = Path::new(&self.work_dir).join(GENERATED_VIDEO_FILE);
        if tokio::fs::metadata(&candidate).await.is_ok() {
            PreviewSource::Local(candidate)
        } else {
            PreviewSource::Remote(STOCK_VIDEO_URL.to_string())
        }
    }
}

/// 按数组顺序一列一个场景排版。零列是非法布局，显式报错
pub fn layout_columns(scenes: &[Scene]) -> Result<String> {
    if scenes.is_empty() {
        return Err(DirectorError::LayoutError(
            "storyboard contained no scenes, cannot lay out zero columns".to_string(),
        ));
    }

    let columns: Vec<Vec<String>> = scenes
        .iter()
        .enumerate()
        .map(|(i, scene)| {
            let mut lines = vec![scene.label(i), String::new()];
            lines.push("Visual:".to_string());
            lines.extend(wrap_text(scene.visual_description(), COLUMN_WIDTH));
            lines.push(String::new());
            lines.push("Audio:".to_string());
            lines.extend(wrap_text(scene.voiceover(), COLUMN_WIDTH));
            lines
        })
        .collect();

    let height = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut out = String::new();
    for row in 0..height {
        let cells: Vec<String> = columns
            .iter()
            .map(|col| {
                let cell = col.get(row).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = COLUMN_WIDTH)
            })
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }
    Ok(out)
}

/// 按词折行，超长单词整体占一行
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
