//! Resume HTTP surface: upload-and-parse, render, and analyze.

pub mod handlers;
