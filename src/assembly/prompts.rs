//! Role-specific prompt construction.

/// Audience role steering the tone of generated answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
    Researcher,
    Scientist,
}

impl Role {
    /// Lenient parse: unknown or missing names default to `Student`.
    pub fn from_name(name: Option<&str>) -> Role {
        match name.unwrap_or("").trim().to_lowercase().as_str() {
            "teacher" => Role::Teacher,
            "researcher" => Role::Researcher,
            "scientist" => Role::Scientist,
            _ => Role::Student,
        }
    }

    /// Instruction fragment injected into the system message.
    pub fn instruction(&self) -> &'static str {
        match self {
            Role::Student => {
                "Explain in simple terms for a student. Focus on definitions and intuition."
            }
            Role::Teacher => "Explain with educational context, analogies, and key takeaways.",
            Role::Researcher => "Provide technical, multi-paper insights. Compare findings.",
            Role::Scientist => {
                "Provide deep technical analysis with precise references and methods."
            }
        }
    }
}

/// System message: assistant persona, role instruction and the citation
/// format directive.
pub fn system_message(role: Role) -> String {
    format!(
        "You are a space biology assistant. {} Cite sources as [n] matching the provided references.",
        role.instruction()
    )
}

/// User message: the question plus the rendered context block.
pub fn user_message(question: &str, context: &str) -> String {
    format!(
        "Question: {question}\n\nContext sources:\n{context}\n\nReturn an answer with citations like [1], [2]. Then list References as a numbered list with URLs."
    )
}
