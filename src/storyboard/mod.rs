use serde::{Deserialize, Serialize};

/// 缺失字段统一用该占位文案，而不是静默渲染 None
pub const MISSING_FIELD_PLACEHOLDER: &str = "(not provided)";

/// 表示一个分镜/场景
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// 场景序号，沿用模型输出的编号，不做校验
    #[serde(default)]
    pub scene: Option<u32>,
    /// 画面描述（给图片生成用的提示词）
    #[serde(default)]
    pub visual_description: Option<String>,
    /// 旁白台词
    #[serde(default)]
    pub voiceover: Option<String>,
}

impl Scene {
    pub fn visual_description(&self) -> &str {
        self.visual_description
            .as_deref()
            .unwrap_or(MISSING_FIELD_PLACEHOLDER)
    }

    pub fn voiceover(&self) -> &str {
        self.voiceover.as_deref().unwrap_or(MISSING_FIELD_PLACEHOLDER)
    }

    /// 展示用的场景标签，编号缺失时退回占位序号
    pub fn label(&self, position: usize) -> String {
        match self.scene {
            Some(n) => format!("Scene {}", n),
            None => format!("Scene {}", position + 1),
        }
    }
}

/// 模型回复的解析结果：结构化分镜，或回退为原始文本
#[derive(Debug, Clone)]
pub enum StoryboardOutcome {
    Scenes(Vec<Scene>),
    RawText(String),
}

/// 去掉模型违反指令加上的 markdown 代码围栏
pub fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// 解析模型回复。JSON 解析失败不是错误，回退为原文展示
pub fn parse_storyboard(raw: &str) -> StoryboardOutcome {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<Vec<Scene>>(cleaned) {
        Ok(scenes) => StoryboardOutcome::Scenes(scenes),
        Err(_) => StoryboardOutcome::RawText(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"[
        {"scene": 1, "visual_description": "A foggy harbor at dawn", "voiceover": "The city wakes."},
        {"scene": 2, "visual_description": "Fishermen hauling nets", "voiceover": "Work begins early."},
        {"scene": 3, "visual_description": "Sunrise over the docks", "voiceover": "A new day."}
    ]"#;

    #[test]
    fn parses_three_scene_array() {
        let outcome = parse_storyboard(WELL_FORMED);
        match outcome {
            StoryboardOutcome::Scenes(scenes) => {
                assert_eq!(scenes.len(), 3);
                assert_eq!(scenes[0].visual_description(), "A foggy harbor at dawn");
                assert_eq!(scenes[2].voiceover(), "A new day.");
                assert_eq!(scenes[1].label(1), "Scene 2");
            }
            StoryboardOutcome::RawText(_) => panic!("expected structured scenes"),
        }
    }

    #[test]
    fn fenced_response_parses_same_as_unfenced() {
        let fenced = format!("```json\n{}\n```", WELL_FORMED);
        let a = match parse_storyboard(&fenced) {
            StoryboardOutcome::Scenes(s) => s,
            StoryboardOutcome::RawText(_) => panic!("fenced response should parse"),
        };
        let b = match parse_storyboard(WELL_FORMED) {
            StoryboardOutcome::Scenes(s) => s,
            StoryboardOutcome::RawText(_) => panic!("plain response should parse"),
        };
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.scene, y.scene);
            assert_eq!(x.visual_description, y.visual_description);
            assert_eq!(x.voiceover, y.voiceover);
        }
    }

    #[test]
    fn bare_fence_without_language_tag_is_stripped() {
        let fenced = format!("```\n{}\n```", WELL_FORMED);
        assert!(matches!(
            parse_storyboard(&fenced),
            StoryboardOutcome::Scenes(s) if s.len() == 3
        ));
    }

    #[test]
    fn non_json_falls_back_to_raw_text() {
        let raw = "Sure! Here is a storyboard idea: open on a wide shot...";
        match parse_storyboard(raw) {
            StoryboardOutcome::RawText(text) => assert_eq!(text, raw),
            StoryboardOutcome::Scenes(_) => panic!("prose must not parse as scenes"),
        }
    }

    #[test]
    fn empty_array_parses_to_zero_scenes() {
        match parse_storyboard("[]") {
            StoryboardOutcome::Scenes(scenes) => assert!(scenes.is_empty()),
            StoryboardOutcome::RawText(_) => panic!("empty array is still valid JSON"),
        }
    }

    #[test]
    fn missing_fields_use_placeholder() {
        let partial = r#"[{"scene": 1}]"#;
        match parse_storyboard(partial) {
            StoryboardOutcome::Scenes(scenes) => {
                assert_eq!(scenes[0].visual_description(), MISSING_FIELD_PLACEHOLDER);
                assert_eq!(scenes[0].voiceover(), MISSING_FIELD_PLACEHOLDER);
            }
            StoryboardOutcome::RawText(_) => panic!("partial scene is valid JSON"),
        }
    }

    #[test]
    fn missing_scene_number_labels_by_position() {
        let scene = Scene {
            scene: None,
            visual_description: Some("x".to_string()),
            voiceover: None,
        };
        assert_eq!(scene.label(0), "Scene 1");
    }
}
