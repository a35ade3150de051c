//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 持有全部临时状态，决定操作顺序：必须先上传成功才能生成。
//!
//! ## 模块划分
//!
//! ### `session` - 页面编排
//! - 组合上传组件、参数面板、结果渲染
//! - 网络调用完成后才更新依赖状态
//! - 所有失败都转为短暂提示，不中断会话
//!
//! ### `interactive` - 交互模式
//! - 把一行命令映射到 `Session` 上的一个操作
//!
//! ## 层次关系
//!
//! ```text
//! interactive (命令行输入)
//!     ↓
//! session (状态 + 顺序)
//!     ↓
//! workflow (UploadWidget / SettingsPanel)
//!     ↓
//! services (归一化 / 渲染 / 剪贴板)  clients (HTTP)
//! ```

pub mod interactive;
pub mod session;

// 重新导出主要类型
pub use session::{Notification, NotificationKind, Phase, Session};
