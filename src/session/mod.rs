use crate::storyboard::StoryboardOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// 会话上下文：仅存活一个进程周期的对话记录。
/// 显式传入各处理函数，不做全局状态
#[derive(Debug, Default)]
pub struct SessionContext {
    messages: Vec<Message>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message {
            role: Role::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    /// 每次提交固定追加一条助手摘要，结构化与回退两条路径一致
    pub fn record_outcome(&mut self, outcome: &StoryboardOutcome) {
        match outcome {
            StoryboardOutcome::Scenes(_) => {
                self.push_assistant("Storyboard cards generated above");
            }
            StoryboardOutcome::RawText(text) => {
                self.push_assistant(text.clone());
            }
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
