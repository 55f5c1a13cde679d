use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::Value;

/// Environment for variable scoping
///
/// A handle to one frame of a chain of frames. Cloning the handle shares the
/// frame; [`freeze`](Self::freeze) produces an independent copy of the chain.
#[derive(Debug, Clone)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

/// Single frame in the environment chain
#[derive(Debug)]
struct Frame {
    /// Variables defined in this frame
    variables: HashMap<String, Value>,
    /// Enclosing frame (None for the top-level frame)
    parent: Option<Environment>,
}

impl Environment {
    /// Creates a new top-level environment
    pub fn new() -> Self {
        Self::from_frame(HashMap::new(), None)
    }

    fn from_frame(variables: HashMap<String, Value>, parent: Option<Environment>) -> Self {
        Environment {
            frame: Rc::new(RefCell::new(Frame { variables, parent })),
        }
    }

    /// Creates a fresh, empty frame whose up-link is `self`
    pub fn child(&self) -> Self {
        Self::from_frame(HashMap::new(), Some(self.clone()))
    }

    /// Binds `name` in this frame, overwriting an existing binding here
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.frame.borrow_mut().variables.insert(name.into(), value);
    }

    /// Looks `name` up from this frame outwards
    pub fn get(&self, name: &str) -> Result<Value> {
        let mut frame = Rc::clone(&self.frame);
        loop {
            let next = {
                let current = frame.borrow();
                if let Some(val) = current.variables.get(name) {
                    return Ok(val.clone());
                }
                match &current.parent {
                    Some(parent) => Rc::clone(&parent.frame),
                    None => break,
                }
            };
            frame = next;
        }

        Err(Error::UndefinedVariable {
            name: name.to_string(),
        })
    }

    /// Checks if a name is bound in any frame of the chain
    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Deep-copies the whole frame chain.
    ///
    /// Later `define`s on the original chain are invisible to the copy, and
    /// the other way round.
    pub fn freeze(&self) -> Environment {
        let mut maps = Vec::new();
        let mut frame = Some(Rc::clone(&self.frame));
        while let Some(current) = frame {
            let borrowed = current.borrow();
            maps.push(borrowed.variables.clone());
            frame = borrowed.parent.as_ref().map(|p| Rc::clone(&p.frame));
        }

        let mut env: Option<Environment> = None;
        for variables in maps.into_iter().rev() {
            env = Some(Self::from_frame(variables, env.take()));
        }
        env.unwrap_or_default()
    }

    /// Number of frames in the chain (1 for the top-level frame)
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut parent = self.frame.borrow().parent.clone();
        while let Some(env) = parent {
            depth += 1;
            parent = env.frame.borrow().parent.clone();
        }
        depth
    }

    /// Names bound directly in this frame, sorted
    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.frame.borrow().variables.keys().cloned().collect();
        names.sort();
        names
    }

    /// True if both handles point at the same frame
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.frame, &other.frame)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
