//! 변환 설정 및 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::error::ConvertError;

/// 장음 표기 방식
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VowelStyle {
    /// ā ī ū ē ō
    #[default]
    Macron,
    /// â î û ê ô
    Circumflex,
}

impl VowelStyle {
    /// 마크론 장모음을 이 방식으로 변환
    pub fn decorate(self, long_vowel: &'static str) -> Cow<'static, str> {
        match self {
            VowelStyle::Macron => Cow::Borrowed(long_vowel),
            VowelStyle::Circumflex => Cow::Owned(
                long_vowel
                    .chars()
                    .map(|c| match c {
                        'ā' => 'â',
                        'ī' => 'î',
                        'ū' => 'û',
                        'ē' => 'ê',
                        'ō' => 'ô',
                        other => other,
                    })
                    .collect(),
            ),
        }
    }
}

impl FromStr for VowelStyle {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "macron" => Ok(VowelStyle::Macron),
            "circumflex" => Ok(VowelStyle::Circumflex),
            _ => Err(ConvertError::InvalidConfiguration(format!("vowel_style: {}", s))),
        }
    }
}

/// 문자표에 없는 문자 처리 방식
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// 버림
    Discard,
    /// 에러 반환
    Raise,
    /// 출력에 그대로 포함
    #[default]
    Include,
}

impl FromStr for UnknownPolicy {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "discard" => Ok(UnknownPolicy::Discard),
            "raise" => Ok(UnknownPolicy::Raise),
            "include" => Ok(UnknownPolicy::Include),
            _ => Err(ConvertError::InvalidConfiguration(format!("unknown_policy: {}", s))),
        }
    }
}

/// 변환 설정
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct KanaConfig {
    /// 장음 표기
    #[serde(default)]
    pub vowel_style: VowelStyle,
    /// 결과 전체를 대문자로
    #[serde(default = "default_uppercase")]
    pub uppercase: bool,
    #[serde(default)]
    pub unknown_policy: UnknownPolicy,
}

fn default_uppercase() -> bool {
    false
}

impl Default for KanaConfig {
    fn default() -> Self {
        Self {
            vowel_style: VowelStyle::default(),
            uppercase: default_uppercase(),
            unknown_policy: UnknownPolicy::default(),
        }
    }
}

impl KanaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vowel_style(mut self, style: VowelStyle) -> Self {
        self.vowel_style = style;
        self
    }

    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    pub fn with_unknown_policy(mut self, policy: UnknownPolicy) -> Self {
        self.unknown_policy = policy;
        self
    }
}

/// 설정 파일 에러
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 읽기/쓰기 실패
    Io(std::io::Error),
    /// JSON 파싱/직렬화 실패
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "설정 파일 입출력 실패: {}", e),
            ConfigError::Parse(e) => write!(f, "설정 파일 형식 오류: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// 설정 파일 경로: ~/.config/kanaconv/config.json
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        });
    home.join(".config").join("kanaconv").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config(path: &Path) -> KanaConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용: {} ({})", path.display(), e);
            KanaConfig::default()
        }),
        Err(_) => KanaConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &KanaConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KanaConfig::default();
        assert_eq!(config.vowel_style, VowelStyle::Macron);
        assert!(!config.uppercase);
        assert_eq!(config.unknown_policy, UnknownPolicy::Include);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = KanaConfig::new()
            .with_vowel_style(VowelStyle::Circumflex)
            .with_unknown_policy(UnknownPolicy::Raise);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"circumflex\""));
        let parsed: KanaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_backward_compat_missing_field() {
        // 이전 설정 파일에 unknown_policy가 없는 경우 기본값 사용
        let json = r#"{"uppercase": true}"#;
        let config: KanaConfig = serde_json::from_str(json).unwrap();
        assert!(config.uppercase);
        assert_eq!(config.vowel_style, VowelStyle::Macron);
        assert_eq!(config.unknown_policy, UnknownPolicy::Include);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Circumflex".parse::<VowelStyle>(), Ok(VowelStyle::Circumflex));
        assert_eq!("discard".parse::<UnknownPolicy>(), Ok(UnknownPolicy::Discard));
        assert!(matches!(
            "sideways".parse::<VowelStyle>(),
            Err(ConvertError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_decorate() {
        assert_eq!(VowelStyle::Macron.decorate("ō"), "ō");
        assert_eq!(VowelStyle::Circumflex.decorate("ō"), "ô");
        assert_eq!(VowelStyle::Circumflex.decorate(""), "");
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("kanaconv-missing").join("config.json");
        assert_eq!(load_config(&path), KanaConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("kanaconv-test-{}", std::process::id()));
        let path = dir.join("config.json");
        let config = KanaConfig::new().with_uppercase(true);

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path), config);

        let _ = fs::remove_dir_all(&dir);
    }
}
