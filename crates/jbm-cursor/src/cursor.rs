//! Lazy token walk over a container.
//!
//! A [`Cursor`] keeps an explicit stack of open containers, one frame per
//! nesting level it has descended into. It never allocates copies of the
//! document: every token borrows from the tree it walks.

use jbm_types::{Container, Document};

use crate::token::{ContainerRef, Token};

enum Frame<'a> {
    Object {
        entries: &'a [(String, Document)],
        pos: usize,
        /// The key at `pos` has been yielded; its value is next.
        at_value: bool,
    },
    Array {
        elems: &'a [Document],
        pos: usize,
    },
}

/// A read-only cursor over an object or array, in stored order.
pub struct Cursor<'a> {
    root: Option<Container<'a>>,
    stack: Vec<Frame<'a>>,
}

impl<'a> Cursor<'a> {
    /// Start a walk over `container`. The first token is its `Begin*`.
    pub fn open(container: Container<'a>) -> Self {
        Self {
            root: Some(container),
            stack: Vec::new(),
        }
    }

    /// Current nesting depth (number of open containers).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Advance one step.
    ///
    /// With `skip_nested`, containers found inside the current one are
    /// yielded as [`Token::ContainerRef`]; otherwise they are unrolled inline.
    /// The flag applies per call, so a walk may mix both modes.
    pub fn next_token(&mut self, skip_nested: bool) -> Token<'a> {
        if let Some(root) = self.root.take() {
            return self.enter(root);
        }

        let value = match self.stack.last_mut() {
            None => return Token::Done,
            Some(Frame::Object {
                entries,
                pos,
                at_value,
            }) => {
                let entries: &'a [(String, Document)] = *entries;
                let Some((key, value)) = entries.get(*pos) else {
                    self.stack.pop();
                    return Token::EndObject;
                };
                if !*at_value {
                    *at_value = true;
                    return Token::Key(key);
                }
                *at_value = false;
                *pos += 1;
                value
            }
            Some(Frame::Array { elems, pos }) => {
                let elems: &'a [Document] = *elems;
                let Some(elem) = elems.get(*pos) else {
                    self.stack.pop();
                    return Token::EndArray;
                };
                *pos += 1;
                elem
            }
        };

        match value.as_container() {
            None => Token::Scalar(value),
            Some(container) if skip_nested => {
                Token::ContainerRef(ContainerRef::from_parts(value, container))
            }
            Some(container) => self.enter(container),
        }
    }

    /// Consume the cursor as an iterator of tokens, stopping before `Done`.
    pub fn tokens(self, skip_nested: bool) -> Tokens<'a> {
        Tokens {
            cursor: self,
            skip_nested,
        }
    }

    fn enter(&mut self, container: Container<'a>) -> Token<'a> {
        match container {
            Container::Object(o) => {
                self.stack.push(Frame::Object {
                    entries: o.entries(),
                    pos: 0,
                    at_value: false,
                });
                Token::BeginObject
            }
            Container::Array(a) => {
                self.stack.push(Frame::Array {
                    elems: a.as_slice(),
                    pos: 0,
                });
                Token::BeginArray
            }
        }
    }
}

/// Iterator returned by [`Cursor::tokens`].
pub struct Tokens<'a> {
    cursor: Cursor<'a>,
    skip_nested: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor.next_token(self.skip_nested) {
            Token::Done => None,
            token => Some(token),
        }
    }
}
