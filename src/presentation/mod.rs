//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating the controller with infrastructure dependencies
//! - Output formatting (text; JSON goes through the event sink)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates the controller with proper dependencies (dependency injection)
//! - `output` - Text rendering of phase responses
//!
//! ## Usage
//!
//! ```ignore
//! use dockyard::presentation::factory;
//!
//! let mut controller = factory::create_controller(&config, false);
//! controller.load(LoadRequest::new(".", SessionId::generate()))?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{BuildArgs, Cli, Commands};
pub use factory::{create_controller, load_providers, ConcreteController};
pub use output::TextRenderer;
