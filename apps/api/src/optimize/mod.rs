// Profile optimization: extract → prompt → model → validate, strictly in sequence.
// No retries and no state between requests.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;
