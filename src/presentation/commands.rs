use crate::application::dto::ImageCommand;
use crate::domain::entities::{CaptionPlacement, FlipDirection};

/// How a verb turns its argument string into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Echo,
    Flip(FlipDirection),
    DeepFry,
    Caption(CaptionPlacement),
}

impl CommandKind {
    fn build(self, arguments: &str) -> ImageCommand {
        match self {
            Self::Echo => ImageCommand::Echo,
            Self::Flip(direction) => ImageCommand::Flip(direction),
            Self::DeepFry => ImageCommand::DeepFry,
            Self::Caption(placement) => ImageCommand::Caption {
                text: arguments.to_string(),
                placement,
            },
        }
    }
}

/// Verb table for the image commands.
pub struct CommandRegistry {
    primary_verbs: Vec<&'static str>,
    bindings: Vec<(&'static str, CommandKind)>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        let mut primary_verbs = Vec::new();
        let mut bindings = Vec::new();

        let mut register = |verb: &'static str, kind: CommandKind, is_primary: bool| {
            if is_primary {
                primary_verbs.push(verb);
            }
            bindings.push((verb, kind));
        };

        register("echo", CommandKind::Echo, true);
        register("imageecho", CommandKind::Echo, false);

        register("vflip", CommandKind::Flip(FlipDirection::Vertical), true);
        register("hflip", CommandKind::Flip(FlipDirection::Horizontal), true);
        register("rotate", CommandKind::Flip(FlipDirection::Both), true);
        register("flip180", CommandKind::Flip(FlipDirection::Both), false);

        register("deepfry", CommandKind::DeepFry, true);
        register("jpegify", CommandKind::DeepFry, false);

        register(
            "caption-top",
            CommandKind::Caption(CaptionPlacement::Top),
            true,
        );
        register(
            "captiontop",
            CommandKind::Caption(CaptionPlacement::Top),
            false,
        );
        register(
            "caption-bottom",
            CommandKind::Caption(CaptionPlacement::Bottom),
            true,
        );
        register(
            "captionbottom",
            CommandKind::Caption(CaptionPlacement::Bottom),
            false,
        );

        Self {
            primary_verbs,
            bindings,
        }
    }
}

impl CommandRegistry {
    /// Creates the registry with every verb and alias.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verbs shown in help, one per command.
    #[must_use]
    pub fn primary_verbs(&self) -> &[&'static str] {
        &self.primary_verbs
    }

    /// Resolves a verb (case-insensitive) and its argument string.
    #[must_use]
    pub fn resolve(&self, verb: &str, arguments: &str) -> Option<ImageCommand> {
        let verb = verb.trim();
        self.bindings
            .iter()
            .find(|(v, _)| v.eq_ignore_ascii_case(verb))
            .map(|(_, kind)| kind.build(arguments))
    }
}
