#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod outfit;
mod preferences;
mod stylist;

pub mod backend;
pub mod session;

pub use backend::{BackendProvider, BackendService, OutfitRequest, RefreshInvoker};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use backend::{MockBackend, MockCalls};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use outfit::{Outfit, OutfitItem, OutfitScores, OutfitSlot};
pub use preferences::{
    BudgetAdjustment, BudgetDirective, BudgetMode, DEFAULT_STYLE, LuxuryToggle,
    RequestPreferences,
};
pub use session::{BackendSession, ChatId, ChatSession, ChatSessionStore, SharedChatSession};
pub use stylist::Stylist;
