use std::fmt::Display;

use itertools::Itertools;

use crate::{
    automaton::{Dfa, StateIndex, Symbol},
    Show,
};

/// Error that can occur when an automaton is rendered through the `dot` executable.
#[cfg(feature = "graphviz")]
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// Spawning `dot` or communicating with it failed.
    #[error("could not communicate with dot: \"{0}\"")]
    Io(#[from] std::io::Error),
    /// `dot` ran but rejected its input.
    #[error("dot exited with {status}: {stderr}")]
    Graphviz {
        /// Exit status of `dot`.
        status: std::process::ExitStatus,
        /// What `dot` wrote to its standard error.
        stderr: String,
    },
}

/// Types that can be exported in the DOT format of graphviz. Implementors only name the
/// graph, its states and its transitions, the layout of the produced text is fixed by
/// [`Dottable::dot_representation`].
pub trait Dottable {
    /// Name of the graph, `A` is used if there is none.
    fn dot_name(&self) -> Option<String>;

    /// The nodes of the graph.
    fn dot_states(&self) -> impl Iterator<Item = StateIndex> + '_;

    /// The edges of the graph as triples of source, symbol and target.
    fn dot_transitions(&self) -> impl Iterator<Item = (StateIndex, Symbol, StateIndex)> + '_;

    /// Identifier of the node standing for `idx`.
    fn dot_state_ident(&self, idx: StateIndex) -> String;

    /// Attributes of the node standing for `idx`.
    fn dot_state_attributes(&self, _idx: StateIndex) -> impl IntoIterator<Item = DotStateAttribute> {
        []
    }

    /// Attributes of the edge from `source` on `symbol`.
    fn dot_transition_attributes(
        &self,
        _source: StateIndex,
        _symbol: Symbol,
    ) -> impl IntoIterator<Item = DotTransitionAttribute> {
        []
    }

    /// Statements placed right after the opening of the graph.
    fn dot_header_statements(&self) -> impl IntoIterator<Item = String> {
        []
    }

    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String {
        let header = std::iter::once(format!(
            "digraph {} {{",
            self.dot_name().unwrap_or("A".to_string())
        ))
        .chain(self.dot_header_statements());

        let states = self.dot_states().map(|q| {
            format!(
                "{} [{}]",
                sanitize_dot_ident(&self.dot_state_ident(q)),
                self.dot_state_attributes(q)
                    .into_iter()
                    .map(|attr| attr.to_string())
                    .join(", ")
            )
        });

        let transitions = self.dot_transitions().map(|(source, symbol, target)| {
            format!(
                "{} -> {} [{}]",
                sanitize_dot_ident(&self.dot_state_ident(source)),
                sanitize_dot_ident(&self.dot_state_ident(target)),
                self.dot_transition_attributes(source, symbol)
                    .into_iter()
                    .map(|attr| attr.to_string())
                    .join(", ")
            )
        });

        header
            .chain(states)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }

    /// Writes the DOT representation into a temporary file and lets the `dot` executable
    /// render it as PNG into `filename`. This method is only available on the `graphviz`
    /// crate feature. If `dot` is not installed, the error is [`RenderError::Io`] with kind
    /// [`std::io::ErrorKind::NotFound`].
    #[cfg(feature = "graphviz")]
    fn render_to_file_name(&self, filename: &str) -> Result<(), RenderError> {
        use std::io::Write;

        let mut source = tempfile::Builder::new().suffix(".dot").tempfile()?;
        source.write_all(self.dot_representation().as_bytes())?;
        source.flush()?;
        tracing::debug!("rendering {} to {filename}", source.path().display());

        let output = std::process::Command::new("dot")
            .arg("-Tpng")
            .arg("-o")
            .arg(filename)
            .arg(source.path())
            .output()?;
        if !output.status.success() {
            return Err(RenderError::Graphviz {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Dottable for Dfa {
    fn dot_name(&self) -> Option<String> {
        Some("DFA".into())
    }

    fn dot_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.state_indices()
    }

    fn dot_transitions(&self) -> impl Iterator<Item = (StateIndex, Symbol, StateIndex)> + '_ {
        self.state_indices().flat_map(move |q| {
            self.transitions_from(q)
                .map(move |(symbol, target)| (q, symbol, target))
        })
    }

    fn dot_state_ident(&self, idx: StateIndex) -> String {
        format!("q{}", idx.show())
    }

    fn dot_header_statements(&self) -> impl IntoIterator<Item = String> {
        [
            "init [label=\"\", shape=none]".to_string(),
            format!("init -> {}", self.dot_state_ident(self.initial())),
        ]
    }

    fn dot_state_attributes(&self, idx: StateIndex) -> impl IntoIterator<Item = DotStateAttribute> {
        let shape = if self.is_accepting(idx) {
            "doublecircle"
        } else {
            "circle"
        };
        let label = match self.label(idx) {
            Some(roots) => format!("{}\\n{}", self.dot_state_ident(idx), roots.show()),
            None => self.dot_state_ident(idx),
        };
        let mut attributes = vec![
            DotStateAttribute::Shape(shape.into()),
            DotStateAttribute::Label(label),
        ];
        if idx == self.initial() {
            attributes.push(DotStateAttribute::Color("red".into()));
        }
        attributes
    }

    fn dot_transition_attributes(
        &self,
        _source: StateIndex,
        symbol: Symbol,
    ) -> impl IntoIterator<Item = DotTransitionAttribute> {
        [DotTransitionAttribute::Label(format!("s{symbol}"))]
    }
}

/// Enum that abstracts attributes of nodes in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
    /// The color of a node
    Color(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{s}\""),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
            DotStateAttribute::Color(c) => write!(f, "color=\"{c}\""),
        }
    }
}

/// Enum that abstracts attributes of edges in the DOT format.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{lbl}\""),
        }
    }
}

fn sanitize_dot_ident(name: &str) -> String {
    name.chars()
        .filter_map(|chr| match chr {
            c if c.is_alphanumeric() => Some(c),
            '|' | ':' | '-' | ' ' => Some('_'),
            '_' => Some('_'),
            _ => None,
        })
        .collect()
}
