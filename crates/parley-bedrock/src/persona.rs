//! Persona resolution: whose portfolio the bot speaks for, and in what
//! voice.

use parley_core::models::session::VoiceStyle;

/// Spellings of the site owner's name that all resolve to the canonical
/// persona.
const OWNER_ALIASES: [&str; 5] = [
    "charlie",
    "chaz",
    "charles o'brien",
    "charles obrien",
    "charles o brien",
];

const OWNER_NAME: &str = "Charles";

/// Resolves the person a question is about.
///
/// Absent or blank input falls back to the configured default. Known
/// aliases of the owner collapse to the canonical name; anything else
/// is title-cased as given.
pub fn normalize_person_name(raw: Option<&str>, default_person: &str) -> String {
    let Some(raw) = raw else {
        return default_person.to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_person.to_string();
    }
    let lowered = trimmed.to_lowercase();
    if OWNER_ALIASES.contains(&lowered.as_str()) {
        return OWNER_NAME.to_string();
    }
    title_case(trimmed)
}

/// Prompt directive for a reply voice. `Normal` adds nothing.
pub fn voice_instructions(style: VoiceStyle) -> &'static str {
    match style {
        VoiceStyle::Normal => "",
        VoiceStyle::Surfer => {
            "Respond in a chill surfer tone. Use friendly casual words like 'dude', \
             'awesome', 'totally', 'stoked'."
        }
        VoiceStyle::Pirate => {
            "Respond like a pirate, playful but clear, throw in an occasional 'Arr' \
             and use pirate speak like 'matey', 'ye', 'aye'."
        }
        VoiceStyle::Ninja => {
            "Respond with ninja wisdom and stealth. Use mysterious, wise language \
             with occasional references to the way of the ninja."
        }
    }
}

/// Uppercases the first letter of every word, lowercasing the rest.
/// Any non-alphabetic character starts a new word, so "o'brien" becomes
/// "O'Brien".
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
