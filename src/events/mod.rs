//! # Events Module
//!
//! Progress reporting for the splitter, the detector and the workflow.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Detect(DetectEvent::DuplicateMarked { renamed, .. }) = event {
//!             println!("marked {}", renamed.display());
//!         }
//!     }
//! });
//!
//! workflow.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
