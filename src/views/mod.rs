//! ビューモジュール

pub mod book;

pub use book::BookView;
