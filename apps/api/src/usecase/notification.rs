//! # 通知ユースケース
//!
//! 通知ジョブの実行フロー（再取得 → レンダリング → 送信 → ステータス更新）
//! を統合する。

mod service;
mod template_renderer;

pub use service::{NotificationJobError, NotificationService};
pub use template_renderer::TemplateRenderer;
