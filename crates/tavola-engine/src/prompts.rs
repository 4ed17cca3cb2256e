//! Canned reply text.

pub const HELP_TEXT: &str = "I can help you find great restaurants! I can:

- Search for restaurants by location and cuisine
- Find popular dining spots
- Recommend places based on your preferences
- Save the results of a search into a named collection
- Help with specific food cravings like \"best butter chicken\"

Just ask me what you're looking for!";

pub const NOTHING_TO_SAVE: &str = "I don't have any recent search results to put in a \
collection. Run a restaurant search first, then ask me to save the results.";
