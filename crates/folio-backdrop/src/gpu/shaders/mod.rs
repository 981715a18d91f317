mod gradient;
mod lines;
mod nodes;

pub use gradient::SHADER_GRADIENT;
pub use lines::SHADER_LINES;
pub use nodes::SHADER_NODES;
