//! # Command Grammar
//!
//! The line-oriented command protocol spoken between the head office and a
//! branch. One line = one command; there is no multi-step protocol.
//!
//! ## Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Command Grammar                                   │
//! │                                                                         │
//! │  line     := VERB [ ARG1 [ ARG2 ] ]        (space-separated)           │
//! │  verbs    := case-sensitive, upper-case                                │
//! │                                                                         │
//! │  HELLO                    greeting                                     │
//! │  GET_STOCK                read stock counters                          │
//! │  RESTOCK <item> <qty>     increase stock                               │
//! │  SALE <item> <qty>        guarded sale                                 │
//! │  GET_SALES                read cumulative sales                        │
//! │  HIRE <name> <role>       add one staff member                         │
//! │  GET_STAFF                read staff head-count                        │
//! │  GET_SUMMARY              full snapshot                                │
//! │  EXIT                     graceful shutdown                            │
//! │                                                                         │
//! │  Anything else - unknown verb OR wrong argument count - is malformed.  │
//! │  A quantity that fails to parse as an integer is treated as zero       │
//! │  (defensive, not fatal).                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item arguments stay as raw strings here: whether `socks` is a failure or a
//! no-op is a business decision made per verb by the interpreter, not by the
//! grammar.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Parse Error
// =============================================================================

/// A line that is not a well-formed command.
///
/// Unknown verbs and wrong argument counts collapse into the same variant:
/// the protocol surfaces both identically, echoing the offending line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown or malformed command: {0}")]
    UnknownOrMalformed(String),
}

// =============================================================================
// Command
// =============================================================================

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Greeting / liveness probe.
    Hello,
    /// Read the stock counters.
    GetStock,
    /// Increase stock of `item` by `qty`.
    Restock { item: String, qty: u32 },
    /// Sell `qty` units of `item` (guarded by available stock).
    Sale { item: String, qty: u32 },
    /// Read the cumulative sales counters.
    GetSales,
    /// Add one staff member. The role is accepted but not stored.
    Hire { name: String, role: String },
    /// Read the staff head-count.
    GetStaff,
    /// Read a full state snapshot.
    GetSummary,
    /// Request graceful shutdown.
    Exit,
}

impl Command {
    /// Parses one command line.
    ///
    /// ## Defensive Quantity Parsing
    /// `RESTOCK shirts abc` parses with qty 0 rather than failing: a head
    /// office typo must not look like a protocol violation. Negative
    /// quantities also land on 0 since stock arithmetic is unsigned.
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| ParseError::UnknownOrMalformed(line.to_string()))?;
        let args: Vec<&str> = words.collect();

        let malformed = || ParseError::UnknownOrMalformed(line.to_string());

        match (verb, args.as_slice()) {
            ("HELLO", []) => Ok(Command::Hello),
            ("GET_STOCK", []) => Ok(Command::GetStock),
            ("RESTOCK", [item, qty]) => Ok(Command::Restock {
                item: item.to_string(),
                qty: parse_qty(qty),
            }),
            ("SALE", [item, qty]) => Ok(Command::Sale {
                item: item.to_string(),
                qty: parse_qty(qty),
            }),
            ("GET_SALES", []) => Ok(Command::GetSales),
            ("HIRE", [name, role]) => Ok(Command::Hire {
                name: name.to_string(),
                role: role.to_string(),
            }),
            ("GET_STAFF", []) => Ok(Command::GetStaff),
            ("GET_SUMMARY", []) => Ok(Command::GetSummary),
            ("EXIT", []) => Ok(Command::Exit),
            _ => Err(malformed()),
        }
    }
}

/// Quantities that fail to parse are zero, never an error.
fn parse_qty(raw: &str) -> u32 {
    raw.parse().unwrap_or(0)
}

impl fmt::Display for Command {
    /// Renders the wire form, i.e. `Command::parse` round-trips `Display`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Hello => write!(f, "HELLO"),
            Command::GetStock => write!(f, "GET_STOCK"),
            Command::Restock { item, qty } => write!(f, "RESTOCK {item} {qty}"),
            Command::Sale { item, qty } => write!(f, "SALE {item} {qty}"),
            Command::GetSales => write!(f, "GET_SALES"),
            Command::Hire { name, role } => write!(f, "HIRE {name} {role}"),
            Command::GetStaff => write!(f, "GET_STAFF"),
            Command::GetSummary => write!(f, "GET_SUMMARY"),
            Command::Exit => write!(f, "EXIT"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zero_arg_verbs() {
        assert_eq!(Command::parse("HELLO").unwrap(), Command::Hello);
        assert_eq!(Command::parse("GET_STOCK").unwrap(), Command::GetStock);
        assert_eq!(Command::parse("GET_SALES").unwrap(), Command::GetSales);
        assert_eq!(Command::parse("GET_STAFF").unwrap(), Command::GetStaff);
        assert_eq!(Command::parse("GET_SUMMARY").unwrap(), Command::GetSummary);
        assert_eq!(Command::parse("EXIT").unwrap(), Command::Exit);
    }

    #[test]
    fn parses_two_arg_verbs() {
        assert_eq!(
            Command::parse("RESTOCK shirts 10").unwrap(),
            Command::Restock {
                item: "shirts".into(),
                qty: 10
            }
        );
        assert_eq!(
            Command::parse("SALE jeans 5").unwrap(),
            Command::Sale {
                item: "jeans".into(),
                qty: 5
            }
        );
        assert_eq!(
            Command::parse("HIRE Anil Cashier").unwrap(),
            Command::Hire {
                name: "Anil".into(),
                role: "Cashier".into()
            }
        );
    }

    #[test]
    fn verbs_are_case_sensitive() {
        assert!(Command::parse("hello").is_err());
        assert!(Command::parse("Get_Stock").is_err());
    }

    #[test]
    fn argument_count_mismatch_is_malformed() {
        assert!(Command::parse("RESTOCK shirts").is_err());
        assert!(Command::parse("SALE jeans 5 extra").is_err());
        assert!(Command::parse("HIRE Anil").is_err());
        assert!(Command::parse("HELLO there").is_err());
        assert!(Command::parse("EXIT now please").is_err());
    }

    #[test]
    fn unknown_verb_echoes_the_line() {
        let err = Command::parse("DANCE shirts 2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown or malformed command: DANCE shirts 2"
        );
    }

    #[test]
    fn empty_and_blank_lines_are_malformed() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("   ").is_err());
    }

    #[test]
    fn non_numeric_quantity_parses_as_zero() {
        assert_eq!(
            Command::parse("RESTOCK shirts lots").unwrap(),
            Command::Restock {
                item: "shirts".into(),
                qty: 0
            }
        );
        // Negative quantities are not representable in unsigned stock math.
        assert_eq!(
            Command::parse("SALE jeans -3").unwrap(),
            Command::Sale {
                item: "jeans".into(),
                qty: 0
            }
        );
    }

    #[test]
    fn unknown_item_still_parses() {
        // Whether `socks` fails or no-ops is the interpreter's call.
        assert_eq!(
            Command::parse("SALE socks 2").unwrap(),
            Command::Sale {
                item: "socks".into(),
                qty: 2
            }
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let commands = [
            Command::Hello,
            Command::Restock {
                item: "shirts".into(),
                qty: 10,
            },
            Command::Hire {
                name: "Anil".into(),
                role: "Cashier".into(),
            },
            Command::Exit,
        ];
        for cmd in commands {
            assert_eq!(Command::parse(&cmd.to_string()).unwrap(), cmd);
        }
    }
}
