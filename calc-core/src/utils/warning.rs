use std::{rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use crate::eval::prelude::EvalWarning;
use super::diagnostic::{Diagnostic, Label, Level, Location, INPUT_NAME};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&self) -> Option<Warning> {
        let mut warnings = self.write_lock();
        warnings.pop()
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

/// Attaches the line being evaluated to every warning raised while evaluating it.
pub struct LineWarningEmitter<'a> {
    src: String,
    emitter: &'a WarningEmitter,
}

impl<'a> LineWarningEmitter<'a> {
    pub fn new(src: String, emitter: &'a WarningEmitter) -> Self {
        Self {
            src,
            emitter,
        }
    }

    pub fn emit(&self, warning: EvalWarning) {
        self.emitter.emit(Warning::Eval {
            src: self.src.clone(),
            warning,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    Eval {
        src: String,
        warning: EvalWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("error pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::Eval { src, warning } => match warning {
                EvalWarning::ConstantOverwritten { name, location } => Diagnostic {
                    title: "Constant overwritten".into(),
                    text: format!("`{name}` is predefined for every user"),
                    hint: None,
                    level: Level::Warning,
                    location: Some(Location {
                        src,
                        name: INPUT_NAME,
                        label: Label {
                            text: Some("The previous value is lost".into()),
                            span: *location,
                        },
                        extra_labels: vec![]
                    }),
                }
            }
        }
    }
}
