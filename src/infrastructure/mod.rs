pub mod glyph_painter;
pub mod smtp_mailer;

pub use glyph_painter::GlyphPainter;
pub use smtp_mailer::SmtpMailer;
