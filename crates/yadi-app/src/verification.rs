//! KYC verification flow.
//!
//! A short-lived state machine gating money movement. The user supplies a
//! phone number, the backend sends an OTP and a magic link, and two
//! completion paths race: manual code entry and the emailed link. Either
//! way, `Verified` is only reached after a session refresh confirms
//! `is_kyc_verified` on the identity — the flow never marks itself complete
//! from local state alone.

use std::sync::Arc;

use futures_signals::signal::{Mutable, Signal};
use yadi_client::{ApiError, VerificationProof, WalletApi};

use crate::session::SessionStore;

/// Where the flow stands.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationState {
    /// Waiting for the user to supply or confirm a phone number.
    AwaitingContact {
        /// Pre-filled or previously entered contact, preserved across
        /// failed attempts.
        contact: String,
        /// Inline error from the last send attempt, if any.
        error: Option<String>,
    },
    /// A code and magic link are out; manual entry and the link race.
    CodeSent {
        /// The contact the code was sent to.
        contact: String,
        /// Inline error from the last confirm attempt, if any.
        error: Option<String>,
    },
    /// Identity confirmed by the server.
    Verified,
    /// The magic-link exchange failed; no session or verification resulted.
    Failed {
        /// Why the exchange failed.
        reason: String,
    },
}

/// Prefer the server's rejection message; fall back to screen copy.
fn inline_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Rejected { message } => message.clone(),
        _ => fallback.to_string(),
    }
}

/// The verification state machine.
///
/// Holds the session store by reference so verification truth always comes
/// from the refreshed identity rather than a duplicated local flag.
#[derive(Clone)]
pub struct VerificationFlow {
    state: Mutable<VerificationState>,
    session: SessionStore,
    api: Arc<dyn WalletApi>,
}

impl VerificationFlow {
    /// A flow that has not been entered yet.
    pub fn new(api: Arc<dyn WalletApi>, session: SessionStore) -> Self {
        Self {
            state: Mutable::new(VerificationState::AwaitingContact {
                contact: String::new(),
                error: None,
            }),
            session,
            api,
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> VerificationState {
        self.state.get_cloned()
    }

    /// Reactive subscription surface.
    pub fn signal(&self) -> impl Signal<Item = VerificationState> {
        self.state.signal_cloned()
    }

    /// (Re)enter the flow.
    ///
    /// Already-verified identities short-circuit straight to `Verified`
    /// without any send-OTP call; otherwise the contact field is pre-filled
    /// from the profile's phone number.
    pub fn start(&self) {
        let profile = self.session.profile();
        if profile.as_ref().is_some_and(|p| p.is_kyc_verified) {
            self.state.set(VerificationState::Verified);
            return;
        }
        let contact = profile.and_then(|p| p.phone_number).unwrap_or_default();
        self.state.set(VerificationState::AwaitingContact {
            contact,
            error: None,
        });
    }

    /// Request the OTP and magic link for `contact`.
    ///
    /// Failure stays in `AwaitingContact` with an inline error and the
    /// contact preserved for retry.
    pub async fn send_code(&self, contact: &str) {
        match self.api.send_verification_otp(contact).await {
            Ok(()) => self.state.set(VerificationState::CodeSent {
                contact: contact.to_string(),
                error: None,
            }),
            Err(error) => self.state.set(VerificationState::AwaitingContact {
                contact: contact.to_string(),
                error: Some(inline_message(&error, "Failed to send code. Try again.")),
            }),
        }
    }

    /// Manual OTP fallback.
    ///
    /// Success only counts once the refreshed identity confirms it. Failure
    /// keeps the flow in `CodeSent` so the user can retry or go back
    /// explicitly — there is no automatic regression to the contact step.
    pub async fn confirm_code(&self, otp: &str) {
        let contact = match self.state.get_cloned() {
            VerificationState::CodeSent { contact, .. } => contact,
            _ => return,
        };
        let proof = VerificationProof::Otp {
            otp: otp.to_string(),
        };
        match self.api.confirm_verification(&proof).await {
            Ok(()) => {
                self.session.check_auth().await;
                if self.identity_verified() {
                    self.state.set(VerificationState::Verified);
                } else {
                    self.state.set(VerificationState::CodeSent {
                        contact,
                        error: Some("Verification is still pending.".to_string()),
                    });
                }
            }
            Err(error) => self.state.set(VerificationState::CodeSent {
                contact,
                error: Some(inline_message(&error, "Invalid code.")),
            }),
        }
    }

    /// Emailed verification-link landing: confirm with the link's token,
    /// then refresh identity.
    ///
    /// Unlike the magic-login exchange this rides the existing session; it
    /// confirms verification but never establishes one.
    pub async fn confirm_link_token(&self, token: &str) {
        let proof = VerificationProof::LinkToken {
            token: token.to_string(),
        };
        match self.api.confirm_verification(&proof).await {
            Ok(()) => {
                self.session.check_auth().await;
                if self.identity_verified() {
                    self.state.set(VerificationState::Verified);
                } else {
                    self.state.set(VerificationState::Failed {
                        reason: "Verification is still pending.".to_string(),
                    });
                }
            }
            Err(error) => self.state.set(VerificationState::Failed {
                reason: inline_message(&error, "Invalid code."),
            }),
        }
    }

    /// Magic-link landing path: exchange the token, then refresh identity.
    ///
    /// An invalid or expired token moves to `Failed` and establishes no
    /// session; the route gate keeps treating the user as anonymous.
    pub async fn exchange_magic_link(&self, token: &str) {
        match self.api.exchange_magic_token(token).await {
            Ok(()) => {
                self.session.check_auth().await;
                if self.identity_verified() {
                    self.state.set(VerificationState::Verified);
                } else {
                    self.state.set(VerificationState::Failed {
                        reason: "Verification is still pending.".to_string(),
                    });
                }
            }
            Err(_) => self.state.set(VerificationState::Failed {
                reason: "This link has expired or is invalid.".to_string(),
            }),
        }
    }

    /// Explicit regression to the contact step ("wrong number? go back").
    pub fn back_to_contact(&self) {
        if let VerificationState::CodeSent { contact, .. } = self.state.get_cloned() {
            self.state.set(VerificationState::AwaitingContact {
                contact,
                error: None,
            });
        }
    }

    fn identity_verified(&self) -> bool {
        self.session
            .profile()
            .is_some_and(|profile| profile.is_kyc_verified)
    }
}
