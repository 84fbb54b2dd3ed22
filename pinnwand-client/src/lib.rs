//! Client-side session state for the feed, post detail, compose and
//! notification views.
//!
//! Each view owns its state in an explicit session or store value; there is
//! no ambient shared cache. Mutations are optimistic: they rewrite local
//! state synchronously and hand back an undo handle so a confirmed failure
//! can be compensated.

pub mod compose;
pub mod feed;
pub mod mutate;
pub mod notifications;
pub mod store;
