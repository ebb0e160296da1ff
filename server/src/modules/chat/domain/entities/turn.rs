/// Turn role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    /// Persona instruction, only ever the seed turn
    System,
    /// User message
    User,
    /// Assistant reply
    Assistant,
}

impl TurnRole {
    /// Role name in the OpenAI wire format
    pub fn to_openai_role(&self) -> &'static str {
        match self {
            TurnRole::System => "system",
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// A single conversation turn
///
/// Immutable once created; part of the Session aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: TurnRole,
    content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }

    // Getters
    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_turns() {
        let user = Turn::user("Hello, AI!");
        assert_eq!(user.role(), TurnRole::User);
        assert_eq!(user.content(), "Hello, AI!");

        let reply = Turn::assistant("Hi there");
        assert_eq!(reply.role(), TurnRole::Assistant);
        assert_eq!(reply.role().to_openai_role(), "assistant");
        assert_eq!(Turn::system("be kind").role().to_openai_role(), "system");
    }
}
