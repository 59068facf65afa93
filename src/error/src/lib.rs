//! 错误类型定义
//!
//! 战斗结算本身不会失败，被拒绝的操作以 `CombatResult` 返回。
//! 可能失败的是外围：加载配置、解码玩家存档、按名称查找卡牌。

use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// 配置值超出范围
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// 存档解码成功但玩家数据无效
    #[error("Invalid player data: {0}")]
    InvalidPlayerData(String),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DecodeError> for GameError {
    fn from(err: DecodeError) -> Self {
        GameError::Deserialization(err.to_string())
    }
}

impl From<EncodeError> for GameError {
    fn from(err: EncodeError) -> Self {
        GameError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

/// 将错误转换为玩家可读的提示
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::Deserialization(_) | GameError::InvalidPlayerData(_) => {
            "Saved hero data is corrupted and cannot be loaded".to_string()
        }
        GameError::Io(e) => match e.kind() {
            std::io::ErrorKind::NotFound => "File not found".to_string(),
            std::io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
            _ => format!("IO error: {}", e),
        },
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_snapshot_message() {
        let err = GameError::InvalidPlayerData("max_hp is zero".into());
        assert_eq!(
            handle_error(&err),
            "Saved hero data is corrupted and cannot be loaded"
        );
    }

    #[test]
    fn test_missing_file_message() {
        let err = GameError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(handle_error(&err), "File not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = GameError::Config("hand_size must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: hand_size must be at least 1"
        );
    }
}
