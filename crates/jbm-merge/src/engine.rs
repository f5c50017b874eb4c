//! The recursive merge algorithm.
//!
//! # Rules
//!
//! - If the first document is not an object, the result is the second.
//! - Otherwise, if the second is not an object, the result is the first.
//! - Two objects merge key by key. A key held by one side only is copied
//!   through. For a key held by both sides:
//!   1. object and object merge recursively;
//!   2. array and array concatenate (first, then second) when
//!      `merge_arrays` is set;
//!   3. anything else takes the second value.
//!
//! # Invariants
//!
//! - Inputs are never modified. Values copied through share storage with the
//!   inputs rather than being walked.
//! - Objects come out in canonical key order.
//! - Each object level owns a fresh [`Builder`]; nothing is shared between
//!   calls, so a [`Merger`] can be used from many threads at once.

use std::cmp::Ordering;

use jbm_builder::Builder;
use jbm_cursor::{ContainerRef, Cursor, Token};
use jbm_types::{compare_keys, Container, Document, Kind, Object};
use tracing::{debug, trace};

use crate::config::{JoinStrategy, MergeConfig};
use crate::stats::MergeStats;

/// A configured merge engine.
#[derive(Clone, Debug, Default)]
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge two possibly absent documents.
    ///
    /// Both absent gives `None`; one absent gives the other unchanged.
    pub fn merge(&self, a: Option<&Document>, b: Option<&Document>) -> Option<Document> {
        self.merge_with_stats(a, b).0
    }

    /// Merge two present documents.
    pub fn merge_documents(&self, a: &Document, b: &Document) -> Document {
        let mut run = Run::new(&self.config);
        run.merge(a, b, 1)
    }

    /// Like [`merge`](Merger::merge), also returning counters for the call.
    pub fn merge_with_stats(
        &self,
        a: Option<&Document>,
        b: Option<&Document>,
    ) -> (Option<Document>, MergeStats) {
        let mut run = Run::new(&self.config);
        let merged = match (a, b) {
            (None, None) => None,
            (None, Some(b)) => Some(b.clone()),
            (Some(a), None) => Some(a.clone()),
            (Some(a), Some(b)) => Some(run.merge(a, b, 1)),
        };
        debug!(
            objects = run.stats.objects_merged,
            arrays = run.stats.arrays_concatenated,
            overrides = run.stats.overrides,
            depth = run.stats.max_depth,
            "merge complete"
        );
        (merged, run.stats)
    }
}

/// State for a single merge call.
struct Run<'c> {
    config: &'c MergeConfig,
    stats: MergeStats,
}

impl<'c> Run<'c> {
    fn new(config: &'c MergeConfig) -> Self {
        Self {
            config,
            stats: MergeStats::default(),
        }
    }

    fn merge(&mut self, a: &Document, b: &Document, depth: usize) -> Document {
        let (Document::Object(oa), Document::Object(ob)) = (a, b) else {
            return if a.is_object() { a.clone() } else { b.clone() };
        };

        self.stats.objects_merged += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        trace!(depth, keys_a = oa.len(), keys_b = ob.len(), "merging objects");

        match self.config.strategy {
            JoinStrategy::SortedJoin => self.sorted_join(oa, ob, depth),
            JoinStrategy::Lookup => self.lookup_join(oa, ob, depth),
        }
    }

    /// Lock-step walk over both objects' canonical key order.
    fn sorted_join(&mut self, oa: &Object, ob: &Object, depth: usize) -> Document {
        let mut builder = Builder::new();
        builder.begin_object();

        let mut ca = open_object(oa);
        let mut cb = open_object(ob);
        let mut ea = next_entry(&mut ca);
        let mut eb = next_entry(&mut cb);

        loop {
            match (ea, eb) {
                (Some((ka, va)), Some((kb, vb))) => {
                    self.stats.keys_compared += 1;
                    match compare_keys(ka, kb) {
                        Ordering::Less => {
                            builder.key(ka);
                            builder.push(va);
                            ea = next_entry(&mut ca);
                        }
                        Ordering::Greater => {
                            builder.key(kb);
                            builder.push(vb);
                            eb = next_entry(&mut cb);
                        }
                        Ordering::Equal => {
                            builder.key(kb);
                            self.merge_values(&mut builder, va, vb, depth);
                            ea = next_entry(&mut ca);
                            eb = next_entry(&mut cb);
                        }
                    }
                }
                (Some((k, v)), None) => {
                    builder.key(k);
                    builder.push(v);
                    ea = next_entry(&mut ca);
                }
                (None, Some((k, v))) => {
                    builder.key(k);
                    builder.push(v);
                    eb = next_entry(&mut cb);
                }
                (None, None) => break,
            }
        }

        finish(builder.end_object())
    }

    /// Point lookup of each key of one side in the other.
    fn lookup_join(&mut self, oa: &Object, ob: &Object, depth: usize) -> Document {
        let mut builder = Builder::new();
        builder.begin_object();

        let mut ca = open_object(oa);
        while let Some((ka, va)) = next_entry(&mut ca) {
            self.stats.lookups += 1;
            builder.key(ka);
            match ob.get(ka) {
                Some(vb) => self.merge_values(&mut builder, va, value_token(vb), depth),
                None => {
                    builder.push(va);
                }
            }
        }

        let mut cb = open_object(ob);
        while let Some((kb, vb)) = next_entry(&mut cb) {
            self.stats.lookups += 1;
            if !oa.contains_key(kb) {
                builder.key(kb);
                builder.push(vb);
            }
        }

        finish(builder.end_object())
    }

    /// Emit the resolved value for a key both objects hold. The key has
    /// already been pushed.
    fn merge_values(&mut self, builder: &mut Builder, va: Token<'_>, vb: Token<'_>, depth: usize) {
        match (va, vb) {
            (Token::ContainerRef(ra), Token::ContainerRef(rb)) => match (ra.kind(), rb.kind()) {
                (Kind::Object, Kind::Object) => {
                    let merged = self.merge(ra.document(), rb.document(), depth + 1);
                    builder.value(merged);
                }
                (Kind::Array, Kind::Array) if self.config.merge_arrays => {
                    self.concat_arrays(builder, ra, rb);
                }
                _ => self.override_with(builder, vb),
            },
            _ => self.override_with(builder, vb),
        }
    }

    fn override_with(&mut self, builder: &mut Builder, vb: Token<'_>) {
        self.stats.overrides += 1;
        builder.push(vb);
    }

    /// Append all elements of `ra` then all elements of `rb` to a new array.
    /// Nested containers inside elements are copied through whole.
    fn concat_arrays(&mut self, builder: &mut Builder, ra: ContainerRef<'_>, rb: ContainerRef<'_>) {
        self.stats.arrays_concatenated += 1;
        builder.begin_array();
        for side in [ra.container(), rb.container()] {
            for token in Cursor::open(side).tokens(true) {
                if token.is_value() {
                    builder.push(token);
                }
            }
        }
        let closed = builder.end_array();
        debug_assert!(closed.is_none(), "concatenated array closed the builder");
    }
}

/// Open a cursor on `object`, positioned after its `BeginObject`.
fn open_object(object: &Object) -> Cursor<'_> {
    let mut cursor = Cursor::open(Container::Object(object));
    let first = cursor.next_token(true);
    debug_assert_eq!(first, Token::BeginObject);
    cursor
}

/// Next `(key, value)` pair of an object cursor, or `None` at its end.
fn next_entry<'a>(cursor: &mut Cursor<'a>) -> Option<(&'a str, Token<'a>)> {
    match cursor.next_token(true) {
        Token::Key(key) => {
            let value = cursor.next_token(true);
            debug_assert!(value.is_value(), "key {key:?} followed by {value:?}");
            Some((key, value))
        }
        _ => None,
    }
}

/// The token a cursor with `skip_nested` would yield for `doc`.
fn value_token(doc: &Document) -> Token<'_> {
    match ContainerRef::new(doc) {
        Some(r) => Token::ContainerRef(r),
        None => Token::Scalar(doc),
    }
}

fn finish(result: Option<Document>) -> Document {
    result.expect("outermost object closes the builder")
}
