//! festive-banner library crate.
//!
//! Festival promotion banners for jewellery shops: an editable form
//! ([`banner`]), movable and resizable text overlays ([`editor`]), a client
//! for the image and video generation service ([`genai`]) and the session
//! orchestration tying them together ([`studio`]).

pub mod banner;
pub mod cli;
pub mod config;
pub mod editor;
pub mod genai;
pub mod studio;
