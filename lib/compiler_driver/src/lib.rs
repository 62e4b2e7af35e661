//! Compiler driver
//!
//! Runs the whole front end over a shader source: parsing, the builtin
//! prelude and semantic analysis. The result is a [Report], that owns
//! the diagnostics and an outline of the top level declarations.
//!
//! ```
//! let report = compiler_driver::check_source("vec3 f(vec3 a) { return normalize(a); }");
//! assert_eq!(report.n_errors(), 0);
//! assert_eq!(report.outline[0].to_string(), "1: function f: vec3 f(vec3)");
//! ```

use core::fmt;
use std::io::{self, Read, stdin};
use std::path::Path;

use arena::DroplessArena;
use ast::Declaration;
use ast::declaration::DeclarationKind;
use error_manager::ErrorManager;
use lexer::Variant;
use log::{debug, info};
use semantic::{Session, Symbol};
use span::{FilePosition, Span};

/// Declarations of the builtin functions and variables
pub const BUILTINS: &str = include_str!("builtins.glsl");

pub struct CompilerSource {
    filename: String,
    text: String,
}

impl CompilerSource {
    pub fn new(filename: String, text: String) -> Self { Self { filename, text } }

    pub fn filename(&self) -> &str { &self.filename }

    pub fn text(&self) -> &str { &self.text }

    pub fn get_file_position(&self, span: Span) -> FilePosition { span.file_position(&self.text) }
}

pub struct Compiler {
    source: CompilerSource,
    variant: Option<Variant>,
    stage: Option<Variant>,
    builtins: bool,
}

impl Compiler {
    fn new(source: CompilerSource) -> Self {
        Self {
            source,
            variant: None,
            stage: None,
            builtins: true,
        }
    }

    /// Reads the source from a file. The shader stage is taken from
    /// it's extension.
    pub fn from_filename<P: AsRef<Path>>(fname: P) -> io::Result<Self> {
        let path = fname.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut comp = Self::new(CompilerSource::new(path.display().to_string(), text));
        comp.stage = stage_for_path(path);
        Ok(comp)
    }

    pub fn from_stdin() -> io::Result<Self> {
        let mut text = String::new();
        stdin().read_to_string(&mut text)?;
        Ok(Self::new(CompilerSource::new("<stdin>".to_string(), text)))
    }

    pub fn from_string(src: impl Into<String>) -> Self {
        Self::new(CompilerSource::new("<string>".to_string(), src.into()))
    }

    /// Uses `variant` instead of detecting it from the `#version` directive
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn with_stage(mut self, stage: Variant) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Enables or disables the builtin prelude. Enabled by default.
    #[must_use]
    pub fn with_builtins(mut self, builtins: bool) -> Self {
        self.builtins = builtins;
        self
    }

    pub fn source(&self) -> &CompilerSource { &self.source }

    /// The variant the source will be lexed with
    pub fn variant(&self) -> Variant {
        let variant = self
            .variant
            .or_else(|| detect_version(&self.source.text))
            .unwrap_or_default();
        match self.stage {
            Some(stage) => variant.with_stage(stage),
            None => variant,
        }
    }

    pub fn process(&self) -> Report {
        let arena = DroplessArena::default();
        let sess = Session::new(&arena).with_variant(self.variant());
        let global = sess.new_namespace();
        debug!("Checking {} with {:?}", self.source.filename, sess.variant());

        if self.builtins {
            load_builtins(&sess, global);
        }

        let unit = parser::parse_translation_unit(&self.source.text, &sess);
        typecheck::analyze(unit, &sess, global);

        let mut outline = Vec::new();
        collect_outline(&sess, unit.decls, &mut outline);

        let diagnostics = sess.take_diagnostics();
        info!(
            "{}: {} errors, {} warnings",
            self.source.filename,
            diagnostics.n_errors(),
            diagnostics.n_warnings()
        );
        Report {
            diagnostics,
            outline,
            declarations: unit.decls.len(),
        }
    }
}

/// Parses and analyzes `src`, with the builtin prelude loaded
pub fn check_source(src: &str) -> Report { Compiler::from_string(src).process() }

/// Declares the [builtins](BUILTINS) in `global`. Diagnostics are
/// blocked, and every keyword enabled, while they're processed.
fn load_builtins<'ctx>(sess: &Session<'ctx>, global: &'ctx Symbol<'ctx>) {
    let variant = sess.variant();
    let blocked = sess.block_diagnostics(true);
    sess.set_variant(Variant::ALL);

    let unit = parser::parse_translation_unit(BUILTINS, sess);
    typecheck::analyze(unit, sess, global);

    sess.set_variant(variant);
    sess.block_diagnostics(blocked);
    debug!("Loaded {} builtin declarations", unit.decls.len());
}

/// Finds the `#version` directive in `src`, and returns the matching variant
///
/// ```
/// use compiler_driver::detect_version;
/// use lexer::Variant;
///
/// let src = "// comment\n#version 300 es\nvoid main() {}";
/// assert_eq!(detect_version(src), Some(Variant::for_version(300, true)));
/// assert_eq!(detect_version("void main() {}"), None);
/// ```
pub fn detect_version(src: &str) -> Option<Variant> {
    src.lines().find_map(|line| {
        let directive = line.trim_start().strip_prefix('#')?;
        let mut words = directive.trim_start().strip_prefix("version")?.split_whitespace();
        let version = words.next()?.parse().ok()?;
        let es = words.next() == Some("es");
        Some(Variant::for_version(version, es))
    })
}

/// The shader stage for a file extension: `.vert` or `.frag`
pub fn stage_for_path(path: &Path) -> Option<Variant> {
    match path.extension()?.to_str()? {
        "vert" | "vs" => Some(Variant::VERTEX_SHADER),
        "frag" | "fs" => Some(Variant::FRAGMENT_SHADER),
        _ => None,
    }
}

/* ==== Reports ==== */

/// Result of processing a source
pub struct Report {
    pub diagnostics: ErrorManager,
    pub outline: Vec<OutlineItem>,
    /// Number of top level declarations
    pub declarations: usize,
}

impl Report {
    pub fn n_errors(&self) -> usize { self.diagnostics.n_errors() }

    pub fn n_warnings(&self) -> usize { self.diagnostics.n_warnings() }

    pub fn has_errors(&self) -> bool { self.diagnostics.has_errors() }

    /// Prints the diagnostics as `[line:col]: severity: message`
    pub fn print_diagnostics(&self, src: &str, out: &mut dyn io::Write) -> io::Result<()> {
        self.diagnostics.print_diagnostics(src, out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineKind {
    Variable,
    Function,
    Struct,
}

impl fmt::Display for OutlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineKind::Variable => write!(f, "variable"),
            OutlineKind::Function => write!(f, "function"),
            OutlineKind::Struct => write!(f, "struct"),
        }
    }
}

/// A top level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineItem {
    pub name: String,
    pub kind: OutlineKind,
    pub ty: String,
    pub line: u32,
}

impl OutlineItem {
    fn new<'ctx>(sess: &Session<'ctx>, sym: &Symbol<'ctx>) -> Self {
        let kind = if sym.is_function() {
            OutlineKind::Function
        } else if sym.is_struct() {
            OutlineKind::Struct
        } else {
            OutlineKind::Variable
        };
        Self {
            name: sess.symbol_name(sym),
            kind,
            ty: sess.ty_to_string(sym.ty()),
            line: sym.line(),
        }
    }
}

impl fmt::Display for OutlineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}: {}", self.line, self.kind, self.name, self.ty)
    }
}

fn collect_outline<'ctx>(sess: &Session<'ctx>, decls: &[&'ctx Declaration<'ctx>], out: &mut Vec<OutlineItem>) {
    use DeclarationKind as DK;

    for decl in decls {
        let sym = match &decl.kind {
            DK::Init(init) => {
                collect_outline(sess, init.decls, out);
                continue;
            }
            DK::TypeAndVariable(tv) => {
                collect_outline(sess, &[tv.type_decl, tv.var_decl], out);
                continue;
            }
            DK::Variable(var) => var.symbol.get(),
            DK::Function(f) => f.symbol.get(),
            DK::Type(t) => t.ty.as_struct().and_then(|st| st.symbol.get()),
            DK::Precision(_) | DK::Parameter(_) | DK::Invariant(_) => None,
        };
        if let Some(sym) = sym {
            out.push(OutlineItem::new(sess, sym));
        }
    }
}
