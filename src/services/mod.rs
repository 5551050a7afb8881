pub mod delivery_agent;
pub mod image_renderer;
pub mod progress_reporter;
pub mod record_extractor;

pub use delivery_agent::{DeliveryAgent, MailTransport, OutgoingMail};
pub use image_renderer::{ImageRenderer, RenderArtifact, Template, TextLine, TextPainter};
pub use progress_reporter::{
    ChannelReporter, FanoutReporter, JsonLinesReporter, ProgressReporter, TracingReporter,
};
pub use record_extractor::{Extraction, RecordExtractor};
