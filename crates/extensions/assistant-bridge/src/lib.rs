//! Assistant bridge for SelectorLab.
//!
//! Turns a natural-language intent, or an imperfect locator plus its
//! surrounding markup, into structured suggestions. A live assistant talks
//! to an OpenAI-compatible endpoint; a mock assistant answers offline with
//! canned, clearly tagged output. Which one a session uses is decided once
//! by [`select_assistant`].

mod bridge;
mod discovery;
mod live;
mod mock;
mod parse;
mod probe;
mod prompts;

pub use bridge::{AssistantBridge, select_assistant, select_assistant_among};
pub use discovery::{
    DEFAULT_CANDIDATE_HOSTS, candidate_endpoints, configured_candidates, discover, discover_among,
    read_nameserver,
};
pub use live::LiveAssistant;
pub use mock::MockAssistant;
pub use parse::{extract_json, parse_generation, parse_refinement};
pub use probe::ConnectivityProbe;
pub use prompts::{generation_messages, refinement_messages, truncate_markup};
