//! # TUI Components
//!
//! ### Stateless (props in struct fields)
//!
//! - `TitleBar`: window title, status text, "↓ New" indicator
//! - `Bubble`: one transcript entry
//! - `StatusLine`: status message and key hints
//! - `SendButton`: clickable send target
//!
//! ### Stateful (persisted in `TuiState`)
//!
//! - `InputBox`: the composer's editing surface
//! - `MessageListState`: scroll + layout cache behind the transient `MessageList`
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── message.rs       (Bubble)
//! ├── message_list.rs
//! ├── send_button.rs
//! ├── status_line.rs
//! └── input_box/
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub mod message;
pub use input_box::{InputBox, InputEvent};
pub mod message_list;
pub use message_list::{MessageList, MessageListState};
pub mod send_button;
pub use send_button::{SEND_BUTTON_WIDTH, SendButton};
mod status_line;
pub use status_line::StatusLine;
