//! Lazy query streams.
//!
//! A [`Stream<K, A>`] is a function "with memory": it holds a head value at
//! its current anchor key, plus an advance routine that, given a new key,
//! produces a successor stream anchored there. The ODE solvers use this to
//! carry integrator state between queries at advancing `t` — evaluating at
//! `t1` and then `t2 > t1` extends the integration instead of restarting it.
//!
//! Streams are persistent values. Producing a successor never mutates the
//! producer: the advance routine is shared structurally (an `Rc`'d closure),
//! so a stream can be queried at different keys from different call sites
//! and the traversals are independent.
//!
//! # Usage
//!
//! ```ignore
//! use odestream::stream::Stream;
//!
//! let squares = Stream::from_fn(0.0, |t: f64| t * t);
//! let (v, rest) = squares.query(3.0);
//! assert_eq!(v, 9.0);
//! assert_eq!(rest.get(4.0), 16.0);
//! ```

use std::fmt;
use std::rc::Rc;

/// A memoized lazy evaluator `K -> (A, Stream<K, A>)`.
pub struct Stream<K, A> {
    repr: Repr<K, A>,
}

enum Repr<K, A> {
    Cons {
        head: A,
        next: Rc<dyn Fn(K) -> Stream<K, A>>,
    },
    /// The stream with no value. Advancing it yields itself; reading its
    /// head is a programming error.
    Undefined,
}

impl<K, A: Clone> Clone for Stream<K, A> {
    fn clone(&self) -> Self {
        match &self.repr {
            Repr::Cons { head, next } => Stream {
                repr: Repr::Cons {
                    head: head.clone(),
                    next: Rc::clone(next),
                },
            },
            Repr::Undefined => Stream {
                repr: Repr::Undefined,
            },
        }
    }
}

impl<K, A: fmt::Debug> fmt::Debug for Stream<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Cons { head, .. } => f.debug_struct("Stream").field("head", head).finish(),
            Repr::Undefined => write!(f, "Stream(undefined)"),
        }
    }
}

impl<K: Copy + 'static, A: Clone + 'static> Stream<K, A> {
    /// Build a stream from a head value and an advance routine.
    pub fn cons(head: A, next: impl Fn(K) -> Stream<K, A> + 'static) -> Self {
        Stream {
            repr: Repr::Cons {
                head,
                next: Rc::new(next),
            },
        }
    }

    /// The stream whose value must never be read.
    ///
    /// Advancing it is allowed (and yields itself); [`Stream::head`] panics.
    pub fn undefined() -> Self {
        Stream {
            repr: Repr::Undefined,
        }
    }

    /// A stream that re-derives its value from each key, anchored at `k0`.
    pub fn from_fn(k0: K, f: impl Fn(K) -> A + 'static) -> Self {
        Self::from_fn_rc(k0, Rc::new(f))
    }

    fn from_fn_rc(k0: K, f: Rc<dyn Fn(K) -> A>) -> Self {
        let head = f(k0);
        Stream::cons(head, move |k| Self::from_fn_rc(k, Rc::clone(&f)))
    }

    /// A stream that emits the same value at every key.
    pub fn constant(a: A) -> Self {
        Stream::cons(a.clone(), move |_| Stream::constant(a.clone()))
    }

    /// The value at the current anchor.
    ///
    /// Panics on [`Stream::undefined`].
    pub fn head(&self) -> &A {
        match &self.repr {
            Repr::Cons { head, .. } => head,
            Repr::Undefined => panic!("head of the undefined stream"),
        }
    }

    /// Advance to `k`, discarding the value.
    pub fn seek(&self, k: K) -> Self {
        match &self.repr {
            Repr::Cons { next, .. } => next(k),
            Repr::Undefined => Stream::undefined(),
        }
    }

    /// Advance to `k`, returning the value there and the successor stream.
    pub fn query(&self, k: K) -> (A, Self) {
        let next = self.seek(k);
        (next.head().clone(), next)
    }

    /// Advance to `k`, keeping only the value.
    pub fn get(&self, k: K) -> A {
        self.seek(k).head().clone()
    }

    /// Scan across a sequence of keys, threading state through.
    pub fn query_many(&self, ks: &[K]) -> (Vec<A>, Self) {
        let mut out = Vec::with_capacity(ks.len());
        let mut cur = self.clone();
        for &k in ks {
            let (v, next) = cur.query(k);
            out.push(v);
            cur = next;
        }
        (out, cur)
    }

    /// Post-compose: apply `g` to every emitted value.
    pub fn map<B: Clone + 'static>(&self, g: impl Fn(&A) -> B + 'static) -> Stream<K, B> {
        self.map_rc(Rc::new(g))
    }

    fn map_rc<B: Clone + 'static>(&self, g: Rc<dyn Fn(&A) -> B>) -> Stream<K, B> {
        match &self.repr {
            Repr::Undefined => Stream::undefined(),
            Repr::Cons { head, next } => {
                let head = g(head);
                let next = Rc::clone(next);
                Stream::cons(head, move |k| next(k).map_rc(Rc::clone(&g)))
            }
        }
    }

    /// Pre-compose: transform each incoming key with `h`.
    pub fn premap<J: Copy + 'static>(&self, h: impl Fn(J) -> K + 'static) -> Stream<J, A> {
        self.premap_rc(Rc::new(h))
    }

    fn premap_rc<J: Copy + 'static>(&self, h: Rc<dyn Fn(J) -> K>) -> Stream<J, A> {
        match &self.repr {
            Repr::Undefined => Stream::undefined(),
            Repr::Cons { head, next } => {
                let head = head.clone();
                let next = Rc::clone(next);
                Stream::cons(head, move |j| next(h(j)).premap_rc(Rc::clone(&h)))
            }
        }
    }

    /// Stream-level composition `self ∘ g`: `g` consumes the key and its
    /// values feed `self`.
    pub fn compose<J: Copy + 'static>(&self, g: &Stream<J, K>) -> Stream<J, A> {
        match (&self.repr, &g.repr) {
            (Repr::Undefined, _) | (_, Repr::Undefined) => Stream::undefined(),
            (Repr::Cons { head, .. }, Repr::Cons { .. }) => {
                let f = self.clone();
                let g = g.clone();
                Stream::cons(head.clone(), move |j| {
                    let g_next = g.seek(j);
                    let f_next = f.seek(*g_next.head());
                    f_next.compose(&g_next)
                })
            }
        }
    }

    /// Element-wise sequencing: a list of streams becomes a stream of lists.
    pub fn seq(ss: Vec<Stream<K, A>>) -> Stream<K, Vec<A>> {
        let heads: Vec<A> = ss.iter().map(|s| s.head().clone()).collect();
        Stream::cons(heads, move |k| {
            Stream::seq(ss.iter().map(|s| s.seek(k)).collect())
        })
    }
}
