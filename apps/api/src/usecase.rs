//! # ユースケース層
//!
//! ハンドラとワーカーから呼び出されるアプリケーションロジックを定義する。

pub mod notification;

pub use notification::{NotificationJobError, NotificationService, TemplateRenderer};
