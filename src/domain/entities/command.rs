use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::application::commands::CommandHandler;

/// Menu section a command is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Settings,
    Download,
    Ai,
    Group,
    Fun,
    Tools,
}

impl Category {
    /// Menu order
    pub const ALL: [Category; 6] = [
        Category::Settings,
        Category::Download,
        Category::Ai,
        Category::Group,
        Category::Fun,
        Category::Tools,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Settings => "⚙️ SETTINGS",
            Category::Download => "📥 DOWNLOAD",
            Category::Ai => "🤖 AI",
            Category::Group => "👥 GROUP",
            Category::Fun => "🎉 FUN",
            Category::Tools => "🔧 TOOLS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Represents a bot command.
///
/// `usage` and `example` are written without the prefix; help output
/// prepends whatever prefix is configured at the time.
pub struct Command {
    pub name: String,
    pub usage: String,
    pub example: String,
    pub description: String,
    pub category: Category,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(name: impl Into<String>, category: Category, handler: impl CommandHandler + 'static) -> Self {
        let name = name.into().to_lowercase();
        Self {
            usage: name.clone(),
            example: name.clone(),
            name,
            description: String::new(),
            category,
            handler: Arc::new(handler),
        }
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("usage", &self.usage)
            .finish()
    }
}

/// Command registry, filled once at startup.
///
/// Keeps registration order so the menu lists commands the way they were
/// added.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command; a later registration under the same name replaces the
    /// earlier one in place.
    pub fn register(&mut self, command: Command) {
        match self.index.get(&command.name) {
            Some(&slot) => self.commands[slot] = command,
            None => {
                self.index.insert(command.name.clone(), self.commands.len());
                self.commands.push(command);
            }
        }
    }

    /// Case-insensitive lookup
    pub fn find(&self, input: &str) -> Option<&Command> {
        self.index
            .get(&input.to_lowercase())
            .map(|&slot| &self.commands[slot])
    }

    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(move |c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}
