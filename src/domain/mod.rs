// Domain layer: core models and ports. No HTTP or vendor API knowledge here.

pub mod model;
pub mod ports;

pub use self::model::{Explanation, ReplyShape, StructuredReply};
pub use self::ports::ChatCompleter;
