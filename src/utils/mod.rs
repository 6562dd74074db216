pub mod text;

pub use text::text_between;
