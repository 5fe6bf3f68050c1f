use crate::{
    emit::{Import, Statement},
    prelude::*,
    strategy::StrategyKind,
};
use std::collections::BTreeSet;

///
/// Phase
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Phase {
    Editor,
    Runtime,
}

impl Phase {
    /// Name of the generated initializer for this phase.
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Editor => "initialize_in_editor",
            Self::Runtime => "initialize_in_runtime",
        }
    }
}

///
/// PhaseSet
///
/// Phases a statement runs in. Editor is the default; `inject_in_runtime`
/// moves a statement, and `inject_in_editor` next to it keeps both.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PhaseSet {
    pub editor: bool,
    pub runtime: bool,
}

impl PhaseSet {
    #[must_use]
    pub fn of(set: &DirectiveSet, kind: StrategyKind) -> Self {
        // asset lookups only exist while editing
        if kind.is_editor_only() {
            return Self {
                editor: true,
                runtime: false,
            };
        }

        let runtime = set.has(Directive::InjectInRuntime);

        Self {
            editor: !runtime || set.has(Directive::InjectInEditor),
            runtime,
        }
    }

    #[must_use]
    pub const fn contains(self, phase: Phase) -> bool {
        match phase {
            Phase::Editor => self.editor,
            Phase::Runtime => self.runtime,
        }
    }
}

///
/// Partition
///
/// Statements bucketed per phase, in member declaration order.
///

#[derive(Clone, Debug, Default)]
pub struct Partition {
    editor: Vec<Statement>,
    runtime: Vec<Statement>,
}

impl Partition {
    pub fn push(&mut self, phases: PhaseSet, stmt: Statement) {
        if phases.editor && phases.runtime {
            self.editor.push(stmt.clone());
            self.runtime.push(stmt);
        } else if phases.runtime {
            self.runtime.push(stmt);
        } else {
            self.editor.push(stmt);
        }
    }

    #[must_use]
    pub fn statements(&self, phase: Phase) -> &[Statement] {
        match phase {
            Phase::Editor => &self.editor,
            Phase::Runtime => &self.runtime,
        }
    }

    #[must_use]
    pub fn count(&self, phase: Phase) -> usize {
        self.statements(phase).len()
    }

    /// Facade imports needed by one phase's method body.
    #[must_use]
    pub fn imports(&self, phase: Phase) -> BTreeSet<Import> {
        self.statements(phase)
            .iter()
            .flat_map(Statement::imports)
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.editor.is_empty() && self.runtime.is_empty()
    }
}

///
/// TESTS
///
