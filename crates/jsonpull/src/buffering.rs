//! Lookahead over a token stream.
//!
//! [`BufferingReader`] lets a caller read ahead to classify a payload (is it
//! a single object, a wrapped collection, an error document?) and then rewind
//! so that the parse path it picks sees every token again from the start.
//!
//! Mechanics
//! - `start_buffering` remembers the current token as the anchor. Every token
//!   read while buffering is logged.
//! - `stop_buffering` rewinds: the anchor becomes current again and the
//!   logged tokens are queued for replay ahead of anything still unread in the
//!   inner reader.
//! - `commit_buffering` keeps the current position and forgets the log.
//!
//! Buffering sessions do not nest; every `start_buffering` must be balanced
//! by a stop or a commit before the next one.

use alloc::{collections::VecDeque, vec::Vec};

use log::debug;

use crate::{
    ext::TokenReader,
    reader::error::{ContractError, ReaderError},
    token::{NodeType, Token},
};

/// A token together with the position it was read at.
#[derive(Debug, Clone)]
struct Logged {
    token: Token,
    position: (usize, usize),
}

#[derive(Debug)]
struct BufferLog {
    anchor: Logged,
    tokens: Vec<Logged>,
    /// The error that ended the session's reads, if any.
    error: Option<ReaderError>,
}

/// A [`TokenReader`] adapter with rewindable lookahead.
///
/// # Examples
///
/// ```rust
/// use jsonpull::{
///     BufferingReader, JsonReader, JsonReaderExt, NodeType, ReaderOptions, TokenReader, Value,
/// };
///
/// let inner = JsonReader::from_text(r#"{"kind": "feed", "items": []}"#, ReaderOptions::default());
/// let mut reader = BufferingReader::new(inner);
///
/// // Sniff the first property without committing to a parse path.
/// let kind = reader.lookahead(|r| {
///     r.advance_to(NodeType::StartObject)?;
///     r.advance_to(NodeType::Property)?;
///     r.read()?;
///     Ok(r.value().cloned())
/// })?;
/// assert_eq!(kind, Some(Value::from("feed")));
///
/// // Nothing was lost: the stream starts over.
/// reader.advance_to(NodeType::StartObject)?;
/// reader.read()?;
/// assert_eq!(reader.read_property_name()?, "kind");
/// # Ok::<(), jsonpull::ReaderError>(())
/// ```
#[derive(Debug)]
pub struct BufferingReader<R> {
    inner: R,
    /// Replayed token currently exposed; `None` means the inner reader's token.
    current: Option<Logged>,
    replay: VecDeque<Logged>,
    /// A fatal error met while buffering, returned once the replay runs out.
    pending_error: Option<ReaderError>,
    log: Option<BufferLog>,
}

impl<R: TokenReader> BufferingReader<R> {
    /// Wraps `inner`, positioned wherever `inner` currently is.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: None,
            replay: VecDeque::new(),
            pending_error: None,
            log: None,
        }
    }

    /// Whether a buffering session is active.
    #[must_use]
    pub fn is_buffering(&self) -> bool {
        self.log.is_some()
    }

    /// Starts logging tokens so that the stream can be rewound to the current
    /// token.
    ///
    /// # Errors
    ///
    /// [`ContractError::BufferingAlreadyActive`] if a session is open.
    pub fn start_buffering(&mut self) -> Result<(), ReaderError> {
        if self.is_buffering() {
            return Err(self.contract_error(ContractError::BufferingAlreadyActive));
        }
        debug!("start buffering at {:?}", self.node_type());
        self.log = Some(BufferLog {
            anchor: self.snapshot(),
            tokens: Vec::new(),
            error: None,
        });
        Ok(())
    }

    /// Ends the session and rewinds to the token that was current when it
    /// started.
    ///
    /// If the session ended in a read error, the replay ends in that same
    /// error.
    ///
    /// # Errors
    ///
    /// [`ContractError::BufferingNotActive`] if no session is open.
    pub fn stop_buffering(&mut self) -> Result<(), ReaderError> {
        let Some(log) = self.log.take() else {
            return Err(self.contract_error(ContractError::BufferingNotActive));
        };
        debug!("rewinding {} buffered tokens", log.tokens.len());
        for logged in log.tokens.into_iter().rev() {
            self.replay.push_front(logged);
        }
        if log.error.is_some() {
            self.pending_error = log.error;
        }
        self.current = Some(log.anchor);
        Ok(())
    }

    /// Ends the session and keeps the current position.
    ///
    /// # Errors
    ///
    /// [`ContractError::BufferingNotActive`] if no session is open.
    pub fn commit_buffering(&mut self) -> Result<(), ReaderError> {
        if self.log.take().is_none() {
            return Err(self.contract_error(ContractError::BufferingNotActive));
        }
        debug!("committed buffered tokens at {:?}", self.node_type());
        Ok(())
    }

    /// Runs `peek` in a buffering session and rewinds afterwards, whatever
    /// `peek` returns.
    ///
    /// # Errors
    ///
    /// The error returned by `peek`, or a contract error if a session was
    /// already open or `peek` closed it.
    pub fn lookahead<T>(
        &mut self,
        peek: impl FnOnce(&mut Self) -> Result<T, ReaderError>,
    ) -> Result<T, ReaderError> {
        self.start_buffering()?;
        let result = peek(self);
        self.stop_buffering()?;
        result
    }

    /// Returns the inner reader.
    ///
    /// Must not be called while buffering or with tokens still waiting to be
    /// replayed; those would be lost.
    pub fn into_inner(self) -> R {
        debug_assert!(!self.is_buffering(), "unbalanced buffering session");
        debug_assert!(self.replay.is_empty(), "replayed tokens would be lost");
        self.inner
    }

    fn snapshot(&self) -> Logged {
        Logged {
            token: self.token().clone(),
            position: self.position(),
        }
    }

    fn contract_error(&self, err: ContractError) -> ReaderError {
        ReaderError::new(err, self.position())
    }

    fn advance(&mut self) -> Result<(), ReaderError> {
        if let Some(logged) = self.replay.pop_front() {
            self.current = Some(logged);
            return Ok(());
        }
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }
        self.current = None;
        self.inner.read().map(drop)
    }
}

impl<R: TokenReader> TokenReader for BufferingReader<R> {
    fn read(&mut self) -> Result<bool, ReaderError> {
        if let Err(err) = self.advance() {
            if let Some(log) = self.log.as_mut() {
                log.error = Some(err.clone());
            }
            return Err(err);
        }
        if self.log.is_some() {
            let logged = self.snapshot();
            if let Some(log) = self.log.as_mut() {
                log.tokens.push(logged);
            }
        }
        Ok(self.node_type() != NodeType::EndOfInput)
    }

    fn token(&self) -> &Token {
        match &self.current {
            Some(logged) => &logged.token,
            None => self.inner.token(),
        }
    }

    fn position(&self) -> (usize, usize) {
        match &self.current {
            Some(logged) => logged.position,
            None => self.inner.position(),
        }
    }
}
