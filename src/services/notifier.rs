//! 通知服务 - 业务能力层
//!
//! 只负责把每个渲染任务的结果告诉使用者，不关心流程

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{error, info, warn};

/// 一条通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// 渲染成功
    Info(String),
    /// 渲染失败
    Error(String),
}

impl Notification {
    /// 成功通知：`<输出路径> was successfully generated`
    pub fn generated(output_path: &Path) -> Self {
        Notification::Info(format!(
            "{} was successfully generated",
            output_path.display()
        ))
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Info(msg) | Notification::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }
}

/// 通知接收方
///
/// 实现必须能在多个任务间共享
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// 只写 tracing 日志
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::Info(msg) => info!("✅ {}", msg),
            Notification::Error(msg) => error!("❌ {}", msg),
        }
    }
}

/// 写 tracing 日志，同时追加到日志文件
pub struct LogFileNotifier {
    log_file_path: PathBuf,
    // 串行化多个任务对同一文件的追加
    lock: Mutex<()>,
}

impl LogFileNotifier {
    pub fn new(log_file_path: impl Into<PathBuf>) -> Self {
        Self {
            log_file_path: log_file_path.into(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, notification: &Notification) -> std::io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)?;

        let level = if notification.is_error() { "ERROR" } else { "INFO" };
        let line = format!(
            "[{}] {} {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            notification.message()
        );
        file.write_all(line.as_bytes())
    }
}

impl Notifier for LogFileNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.append(&notification) {
            warn!(
                "写入日志文件失败 ({}): {}",
                self.log_file_path.display(),
                e
            );
        }
        TracingNotifier.notify(notification);
    }
}

/// 把通知保存在内存里，方便调用方事后检查
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(Notification::is_error)
            .map(|n| n.message().to_string())
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_message() {
        let n = Notification::generated(Path::new("/docs/a_mrmd_1.png"));
        assert_eq!(n, Notification::Info("/docs/a_mrmd_1.png was successfully generated".to_string()));
        assert!(!n.is_error());
    }

    #[test]
    fn test_log_file_notifier_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("render.log");
        let notifier = LogFileNotifier::new(&path);

        notifier.notify(Notification::Info("first".to_string()));
        notifier.notify(Notification::Error("second".to_string()));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("INFO first"));
        assert!(lines[1].ends_with("ERROR second"));
    }

    #[test]
    fn test_memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::Error("boom".to_string()));
        notifier.notify(Notification::Info("ok".to_string()));

        assert_eq!(notifier.notifications().len(), 2);
        assert_eq!(notifier.errors(), vec!["boom".to_string()]);
    }
}
