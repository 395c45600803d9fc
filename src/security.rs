//! Security Module
//!
//! 入力ファイルに対する制限を定義するモジュール。

use crate::error::ScheduleError;

/// セキュリティ設定
///
/// ファイル処理時の制限を定義します。
#[derive(Debug, Clone)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
        }
    }
}

impl SecurityConfig {
    /// 読み込んだバイト数が上限以内かを検証する
    pub fn check_input_size(&self, bytes_read: usize) -> Result<(), ScheduleError> {
        if bytes_read as u64 > self.max_input_file_size {
            return Err(ScheduleError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes_read, self.max_input_file_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_input_size() {
        let config = SecurityConfig {
            max_input_file_size: 1024,
        };
        assert!(config.check_input_size(1024).is_ok());

        match config.check_input_size(1025) {
            Err(ScheduleError::SecurityViolation(msg)) => {
                assert!(msg.contains("exceeds maximum"));
            }
            _ => panic!("Expected SecurityViolation error"),
        }
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(SecurityConfig::default().max_input_file_size, 2_147_483_648);
    }
}
