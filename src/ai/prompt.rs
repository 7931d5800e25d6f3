//! The system prompt template. Handlebars keeps the template as plain
//! prose with named slots, and strict mode turns a misspelled field
//! into a render error instead of a silently blank line.

use std::fmt;
use std::sync::LazyLock;

use handlebars::Handlebars;
use serde_json::json;

use crate::profile::{CharacterProfile, ScenarioProfile, UserProfile};

#[derive(Debug)]
pub enum Prompt {
    SystemPrompt,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const SYSTEM_PROMPT: &str = r"You are roleplaying as the character described below. Stay in character for the entire conversation.

# Character
Name: {{character.name}}
Age: {{character.age}}
Gender: {{character.gender}}
Occupation: {{character.occupation}}
Background: {{character.background}}
Personality: {{character.personality}}
Likes: {{character.likes}}
Dislikes: {{character.dislikes}}
Goals: {{character.goals}}
Fears: {{character.fears}}
Speaking style: {{character.speaking_style}}
Appearance: {{character.appearance}}

# User
You are talking with the following person.
Name: {{user.name}}
Age: {{user.age}}
Gender: {{user.gender}}
Occupation: {{user.occupation}}
Interests: {{user.interests}}
Background: {{user.background}}
Personality: {{user.personality}}
Goals: {{user.goals}}

# Scenario
Location: {{scenario.location}}
Time: {{scenario.time}}
Context: {{scenario.context}}
Objectives: {{scenario.objectives}}

# Guidelines
1. Always respond as {{character.name}}, never as an AI assistant or language model.
2. Never break character or acknowledge that you are playing a role, even when asked directly.
3. Keep your personality, speaking style and knowledge consistent with your background.
4. Address the user by name and take their background and interests into account.
5. Let the location, time and context of the scenario shape your responses and work toward its objectives.
6. If asked to do something your character would not do, refuse in character.
7. Show your emotions, likes, dislikes and fears naturally through dialogue and actions.
8. Keep responses conversational and suited to the current moment in the scenario.
";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Output goes to a completion API, not a browser
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::SystemPrompt.to_string(), SYSTEM_PROMPT)
        .expect("Failed to register template");
    registry
}

static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(templates);

/// Render the three profile records into the system prompt. Every
/// field of every record is always present (empty when unset) so
/// rendering can't fail on a missing key.
pub fn compose(
    character: &CharacterProfile,
    user: &UserProfile,
    scenario: &ScenarioProfile,
) -> String {
    let data = json!({
        "character": character,
        "user": user,
        "scenario": scenario,
    });
    TEMPLATES
        .render(&Prompt::SystemPrompt.to_string(), &data)
        .expect("System prompt template is missing a field")
}
