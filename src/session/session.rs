use tracing::debug;

use crate::{
    ast::ast::File,
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::Token},
    parser::{harvest::harvest, parser::parse},
    registry::registry::Registry,
    type_checker::{type_checker::type_check, type_table::TypeTable},
};

use super::prelude::{DEFAULT_VECTOR_ALIASES, PRELUDE_PATH, PRELUDE_SOURCE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Compile the standard library surface ahead of the user files
    pub include_prelude: bool,
    /// Struct names that support `+`, `-` and scalar `*`
    pub vector_aliases: Vec<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            include_prelude: true,
            vector_aliases: DEFAULT_VECTOR_ALIASES
                .iter()
                .map(|alias| alias.to_string())
                .collect(),
        }
    }
}

/// A named source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: &str, text: &str) -> Self {
        SourceFile {
            path: path.to_string(),
            text: text.to_string(),
        }
    }
}

/// The checked program: its parsed files, the type of every expression and
/// the registry describing every declared type.
#[derive(Debug, Clone)]
pub struct CompiledProgram {
    pub prelude: Option<File>,
    /// User files, in the order they were given
    pub files: Vec<File>,
    pub types: TypeTable,
    pub registry: Registry,
}

#[derive(Debug)]
pub struct Session {
    options: SessionOptions,
    registry: Registry,
    next_id: u32,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Session {
            options,
            registry: Registry::new(),
            next_id: 0,
        }
    }

    /// Compiles the given files as one program, stopping at the first error.
    pub fn compile(mut self, sources: &[SourceFile]) -> Result<CompiledProgram, Error> {
        let mut streams: Vec<Vec<Token>> = Vec::with_capacity(sources.len() + 1);

        if self.options.include_prelude {
            streams.push(tokenize(
                PRELUDE_SOURCE.to_string(),
                Some(PRELUDE_PATH.to_string()),
            )?);
        }

        for source in sources {
            let tokens = tokenize(source.text.clone(), Some(source.path.clone()))?;
            debug!(file = %source.path, tokens = tokens.len(), "tokenized file");
            streams.push(tokens);
        }

        // Every name is known before any declaration is parsed
        let mut skeletons = Vec::with_capacity(streams.len());
        for tokens in &streams {
            skeletons.push(harvest(tokens, &mut self.registry)?);
        }

        let mut files = Vec::with_capacity(streams.len());
        for (tokens, skeletons) in streams.iter().zip(&skeletons) {
            files.push(parse(
                tokens,
                skeletons,
                &mut self.registry,
                &mut self.next_id,
            )?);
        }

        let types = type_check(
            files.iter(),
            &mut self.registry,
            &self.options.vector_aliases,
        )?;
        debug!(
            files = files.len(),
            expressions = types.len(),
            types = self.registry.types().count(),
            "checked program"
        );

        let prelude = if self.options.include_prelude && !files.is_empty() {
            Some(files.remove(0))
        } else {
            None
        };

        Ok(CompiledProgram {
            prelude,
            files,
            types,
            registry: self.registry,
        })
    }
}

/// Compiles the given files with the default options.
pub fn compile(sources: &[SourceFile]) -> Result<CompiledProgram, Error> {
    Session::new(SessionOptions::default()).compile(sources)
}
