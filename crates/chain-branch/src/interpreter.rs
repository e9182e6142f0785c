//! # Command Interpreter
//!
//! Stateless per-command dispatch: each line is parsed, executed against the
//! state engine, and answered with a branch-tagged reply. There is no
//! multi-step protocol and no session state.
//!
//! ## Failure Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Protocol error   (unknown verb, wrong arity)  → "Unknown or           │
//! │                                                   malformed command"    │
//! │  Business failure (oversell, unknown item in   → "Sale failed ...      │
//! │                    SALE)                          (insufficient stock   │
//! │                                                   or bad item)"         │
//! │  Both are replies, never crashes. The two are distinguishable on the   │
//! │  wire so the head office can tell a typo from an empty shelf.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chain_core::{Command, Item, Reply};

use crate::engine::StateEngine;

/// The outcome of dispatching one line.
#[derive(Debug)]
pub struct Dispatch {
    /// The reply to put on the wire.
    pub reply: Reply,

    /// True when the command asks the branch to shut down.
    pub exit: bool,
}

/// Parses and executes command lines for one branch.
#[derive(Clone)]
pub struct Interpreter {
    branch: String,
    engine: StateEngine,
}

impl Interpreter {
    pub fn new(branch: impl Into<String>, engine: StateEngine) -> Self {
        Interpreter {
            branch: branch.into(),
            engine,
        }
    }

    /// Dispatches one raw line.
    pub async fn dispatch(&self, line: &str) -> Dispatch {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => return self.done(e.to_string()),
        };

        match command {
            Command::Hello => self.done(format!("Hello from {}.", self.branch)),

            Command::GetStock => {
                let state = self.engine.summary().await;
                self.done(format!(
                    "Stock -> shirts={}, jeans={}",
                    state.shirts, state.jeans
                ))
            }

            Command::Restock { item, qty } => {
                // Unknown item: the state is untouched but the command still
                // gets its confirmation, matching the head office's view of
                // restocking as fire-and-forget.
                if let Ok(item) = item.parse::<Item>() {
                    self.engine.restock(item, qty).await;
                }
                self.done(format!("Restocked {item} by {qty}."))
            }

            Command::Sale { item, qty } => {
                let sold = match item.parse::<Item>() {
                    Ok(parsed) => self.engine.sell(parsed, qty).await.is_ok(),
                    Err(_) => false,
                };
                if sold {
                    self.done(format!("Sale recorded: {item} {qty}."))
                } else {
                    self.done(format!(
                        "Sale failed for {item} {qty} (insufficient stock or bad item)."
                    ))
                }
            }

            Command::GetSales => {
                let state = self.engine.summary().await;
                self.done(format!(
                    "Sales -> shirts={}, jeans={}",
                    state.sales_shirts, state.sales_jeans
                ))
            }

            Command::Hire { name, .. } => {
                let staff = self.engine.hire().await;
                self.done(format!("Hired {name}. Staff now {staff}."))
            }

            Command::GetStaff => {
                let state = self.engine.summary().await;
                self.done(format!("Staff count -> {}", state.staff_count))
            }

            Command::GetSummary => {
                let state = self.engine.summary().await;
                self.done(format!(
                    "Summary :: stock(shirts={}, jeans={}), staff={}, sales(shirts={}, jeans={})",
                    state.shirts,
                    state.jeans,
                    state.staff_count,
                    state.sales_shirts,
                    state.sales_jeans
                ))
            }

            Command::Exit => Dispatch {
                reply: Reply::new(&self.branch, "Shutting down gracefully."),
                exit: true,
            },
        }
    }

    fn done(&self, text: String) -> Dispatch {
        Dispatch {
            reply: Reply::new(&self.branch, text),
            exit: false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
