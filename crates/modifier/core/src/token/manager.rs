//! Registry of independently lifetimed tokens.

use std::fmt;

use countdown::{CountdownTimer, Listeners};

use super::combine::Combine;
use super::duration::TokenDuration;

/// Opaque reference to a token inside one [`TokenManager`].
///
/// Handles are never reused, so holding one after the token expired is
/// harmless: removing it again is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenHandle(u64);

/// Event emitted on [`TokenManager::on_expire`] after a token was pruned.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenExpired<T> {
    pub handle: TokenHandle,
    pub value: T,
}

/// Read-only view of a live token, for debug display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenView<'a, T> {
    pub handle: TokenHandle,
    pub value: &'a T,
    /// Time left, or `Infinite` for permanent tokens.
    pub remaining: TokenDuration,
}

#[derive(Debug)]
enum Lifetime {
    Permanent,
    Timed(CountdownTimer),
}

impl Lifetime {
    fn from_duration(duration: TokenDuration) -> Self {
        match duration.normalized() {
            TokenDuration::Infinite => Lifetime::Permanent,
            TokenDuration::Timed(secs) => match CountdownTimer::once(secs) {
                Ok(timer) => Lifetime::Timed(timer),
                Err(e) => {
                    tracing::warn!("token timer rejected ({}), keeping token permanent", e);
                    Lifetime::Permanent
                }
            },
        }
    }

    fn remaining(&self) -> TokenDuration {
        match self {
            Lifetime::Permanent => TokenDuration::Infinite,
            Lifetime::Timed(timer) => TokenDuration::Timed(timer.remaining()),
        }
    }
}

#[derive(Debug)]
struct ManagedToken<T> {
    handle: TokenHandle,
    value: T,
    lifetime: Lifetime,
}

/// Dynamic set of expiring or permanent modifier values.
///
/// # Semantics
///
/// - Tokens are kept in insertion order
/// - [`update`](Self::update) advances every timed token once and prunes the
///   expired ones in the same call
/// - [`value`](Self::value) folds the combination over live tokens on demand,
///   returning the default when the stack is empty
/// - Folding borrows the manager immutably, so tokens cannot be added or
///   removed while a fold is running
///
/// # Example
///
/// ```
/// # use modifier_core::{Product, TokenManager};
/// let mut speed = TokenManager::new(Product);
/// let boost = speed.add_token(2.0f32, 3.0, false);
/// speed.add_token(3.0, -1.0, false);
/// assert_eq!(speed.value(), 6.0);
///
/// speed.remove_token(boost);
/// assert_eq!(speed.value(), 3.0);
/// ```
pub struct TokenManager<T, C> {
    tokens: Vec<ManagedToken<T>>,
    combine: C,
    default: Option<T>,
    next_handle: u64,
    on_expire: Listeners<TokenExpired<T>>,
}

impl<T, C> TokenManager<T, C>
where
    C: Combine<T>,
{
    /// Creates an empty stack whose empty value is the combination's identity.
    pub fn new(combine: C) -> Self {
        Self {
            tokens: Vec::new(),
            combine,
            default: None,
            next_handle: 0,
            on_expire: Listeners::new(),
        }
    }

    /// Overrides the value reported while no token is live (builder pattern).
    #[must_use]
    pub fn with_default(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Adds a token; `duration_secs < 0` or `is_permanent` never expires.
    pub fn add_token(&mut self, value: T, duration_secs: f32, is_permanent: bool) -> TokenHandle {
        let duration = if is_permanent {
            TokenDuration::Infinite
        } else {
            TokenDuration::from_secs(duration_secs)
        };
        self.add(value, duration)
    }

    /// Adds a token with an explicit lifetime.
    pub fn add(&mut self, value: T, duration: TokenDuration) -> TokenHandle {
        let handle = TokenHandle(self.next_handle);
        self.next_handle += 1;

        let lifetime = Lifetime::from_duration(duration);
        tracing::trace!("token {:?} added ({:?})", handle, lifetime.remaining());

        self.tokens.push(ManagedToken {
            handle,
            value,
            lifetime,
        });
        handle
    }

    /// Removes a token immediately and returns its value.
    ///
    /// Returns `None` when the token already expired or was removed.
    pub fn remove_token(&mut self, handle: TokenHandle) -> Option<T> {
        let index = self.tokens.iter().position(|t| t.handle == handle)?;
        tracing::trace!("token {:?} removed", handle);
        Some(self.tokens.remove(index).value)
    }

    /// Replaces a live token's lifetime, e.g. when a buff is re-applied.
    ///
    /// Returns `false` if the token is gone.
    pub fn refresh(&mut self, handle: TokenHandle, duration: TokenDuration) -> bool {
        match self.tokens.iter_mut().find(|t| t.handle == handle) {
            Some(token) => {
                token.lifetime = Lifetime::from_duration(duration);
                true
            }
            None => false,
        }
    }

    /// Advances every timed token by `dt` and prunes the expired ones.
    ///
    /// Expiry listeners run after pruning, so they observe the stack without
    /// the expired tokens. Returns the number of tokens pruned.
    pub fn update(&mut self, dt: f32) -> usize {
        let mut any_expired = false;
        for token in &mut self.tokens {
            if let Lifetime::Timed(timer) = &mut token.lifetime {
                timer.update(dt);
                any_expired |= timer.is_complete();
            }
        }
        if !any_expired {
            return 0;
        }

        let (expired, live): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tokens)
            .into_iter()
            .partition(|t| matches!(&t.lifetime, Lifetime::Timed(timer) if timer.is_complete()));
        self.tokens = live;

        let count = expired.len();
        for token in expired {
            tracing::trace!("token {:?} expired", token.handle);
            self.on_expire.emit(&TokenExpired {
                handle: token.handle,
                value: token.value,
            });
        }
        count
    }

    /// Aggregate of all live tokens.
    pub fn value(&self) -> T
    where
        T: Clone,
    {
        if self.tokens.is_empty()
            && let Some(default) = &self.default
        {
            return default.clone();
        }
        self.tokens
            .iter()
            .fold(self.combine.identity(), |acc, t| {
                self.combine.combine(acc, &t.value)
            })
    }

    /// Live token values in insertion order.
    pub fn tokens(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.tokens.iter().map(|t| &t.value)
    }

    /// Live tokens with their handles and remaining time.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = TokenView<'_, T>> + '_ {
        self.tokens.iter().map(|t| TokenView {
            handle: t.handle,
            value: &t.value,
            remaining: t.lifetime.remaining(),
        })
    }

    pub fn get(&self, handle: TokenHandle) -> Option<&T> {
        self.tokens
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| &t.value)
    }

    pub fn remaining(&self, handle: TokenHandle) -> Option<TokenDuration> {
        self.tokens
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.lifetime.remaining())
    }

    pub fn contains(&self, handle: TokenHandle) -> bool {
        self.tokens.iter().any(|t| t.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drops every token without emitting expiry events.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Expiry listeners. Clone the handle to register from elsewhere.
    pub fn on_expire(&self) -> &Listeners<TokenExpired<T>> {
        &self.on_expire
    }

    pub fn combination(&self) -> &C {
        &self.combine
    }
}

impl<T, C> Default for TokenManager<T, C>
where
    C: Combine<T> + Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for TokenManager<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("tokens", &self.tokens)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}
