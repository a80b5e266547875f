use std::collections::BTreeMap;

const STANDARD_LABELS: &[(&str, &str)] = &[
    ("admin", "Administrativo"),
    ("hub", "Polo"),
    ("hubs", "Polos"),
    ("teacher", "Professor"),
    ("teachers", "Professores"),
    ("partner", "Parceiro"),
    ("partners", "Parceiros"),
    ("student", "Aluno"),
    ("students", "Alunos"),
    ("dashboard", "Dashboard"),
    ("courses", "Cursos"),
    ("subjects", "Disciplinas"),
    ("modules", "Módulos"),
    ("classes", "Turmas"),
    ("assessments", "Avaliações"),
    ("quizzes", "Questionários"),
    ("reports", "Relatórios"),
    ("settings", "Configurações"),
    ("portal-view", "Visualizar Portal"),
    ("new", "Novo"),
    ("create", "Criar"),
    ("edit", "Editar"),
    ("view", "Visualizar"),
];

/// Path segment to display label. Keys are literal URL segments.
#[derive(Debug, Clone)]
pub struct LabelDictionary {
    entries: BTreeMap<String, String>,
}

impl LabelDictionary {
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_LABELS
                .iter()
                .map(|(s, l)| (s.to_string(), l.to_string()))
                .collect(),
        }
    }

    /// Workspace overrides replace standard labels for the same segment.
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.entries.extend(overrides);
        self
    }

    pub fn lookup(&self, segment: &str) -> Option<&str> {
        self.entries.get(segment).map(String::as_str)
    }

    pub fn label_for(&self, segment: &str) -> String {
        match self.lookup(segment) {
            Some(label) => label.to_string(),
            None => capitalize_first(segment),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, l)| (s.as_str(), l.as_str()))
    }
}

pub fn is_standard_segment(segment: &str) -> bool {
    STANDARD_LABELS.iter().any(|(s, _)| *s == segment)
}

/// First character uppercased, remainder untouched.
pub fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
