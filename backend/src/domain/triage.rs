//! Support query triage: topic classification and priority scoring.
//!
//! Classification walks a fixed banking taxonomy and scores every keyword by
//! how many of its tokens fuzzily appear in the query. The best-covered
//! keyword decides the topic path; weak matches fall back to `Others`.
//! Priority combines a per-topic base, sub-topic boosts and the caller's
//! urgency, clamped to `1..=10`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Minimum keyword coverage required before a topic is accepted.
pub const MIN_COVERAGE: f64 = 0.3;
/// Similarity at which a keyword token counts as present in the query.
pub const TOKEN_MATCH_THRESHOLD: f64 = 0.8;
/// Lowest priority a ticket can receive.
pub const PRIORITY_MIN: u8 = 1;
/// Highest priority a ticket can receive.
pub const PRIORITY_MAX: u8 = 10;

const FALLBACK_TOPIC: &str = "Others";

enum Entries {
    Keywords(&'static [&'static str]),
    Nested(&'static [(&'static str, &'static [&'static str])]),
}

struct Topic {
    name: &'static str,
    base_priority: i32,
    sub_topics: &'static [(&'static str, Entries)],
}

const TAXONOMY: &[Topic] = &[
    Topic {
        name: "Account-Related",
        base_priority: 5,
        sub_topics: &[
            (
                "Personal Accounts",
                Entries::Keywords(&[
                    "balance inquiry",
                    "savings account issue",
                    "current account details",
                    "open personal account",
                    "close personal account",
                    "update personal details",
                    "KYC verification",
                ]),
            ),
            (
                "Business/Corporate Accounts",
                Entries::Keywords(&[
                    "business account opening",
                    "corporate account transactions",
                    "authorized signatory updates",
                    "KYC for businesses",
                ]),
            ),
            (
                "Account for Pensioners",
                Entries::Keywords(&[
                    "pension account opening",
                    "pension credit inquiry",
                    "life certificate submission",
                    "special interest rates for pensioners",
                ]),
            ),
            (
                "Account for Armed Forces",
                Entries::Keywords(&[
                    "salary credit schedule",
                    "defense benefits inquiries",
                    "special rate queries",
                    "account opening under defense scheme",
                ]),
            ),
            (
                "Bank Employee Accounts",
                Entries::Keywords(&[
                    "staff account benefits",
                    "employee salary account",
                    "concessional loan requests",
                ]),
            ),
        ],
    },
    Topic {
        name: "Transactions & Payments",
        base_priority: 7,
        sub_topics: &[
            (
                "Domestic Transfers",
                Entries::Keywords(&[
                    "fund transfer",
                    "failed transaction",
                    "UPI issue",
                    "NEFT issue",
                    "IMPS issue",
                    "refund request",
                    "chargeback",
                ]),
            ),
            (
                "High-Value & International Transfers",
                Entries::Keywords(&[
                    "RTGS",
                    "international payments",
                    "cross-border transfer",
                    "exchange rate queries",
                ]),
            ),
            (
                "Bill & Utility Payments",
                Entries::Keywords(&[
                    "bill payment issue",
                    "auto-debit setup",
                    "utility payment failures",
                    "refund tracking for bill payments",
                ]),
            ),
            (
                "Pension & Welfare Payments",
                Entries::Keywords(&[
                    "pension disbursement",
                    "government welfare scheme credit",
                    "armed forces pension adjustments",
                ]),
            ),
        ],
    },
    Topic {
        name: "Cards & Loans",
        base_priority: 6,
        sub_topics: &[
            (
                "Credit Cards",
                Entries::Keywords(&[
                    "credit card application status",
                    "limit increase request",
                    "card block",
                    "lost or stolen card",
                    "card replacement",
                    "fraud on credit card",
                    "EMI on credit card",
                    "interest rate on credit card",
                ]),
            ),
            (
                "Debit Cards",
                Entries::Keywords(&[
                    "debit card block",
                    "PIN reset",
                    "card replacement request",
                    "transaction failure at POS",
                    "international usage enablement",
                ]),
            ),
            (
                "Loans",
                Entries::Nested(&[
                    (
                        "Personal Loan",
                        &[
                            "loan application process",
                            "personal loan interest rate",
                            "repayment schedule",
                            "loan foreclosure",
                            "top-up loan request",
                        ],
                    ),
                    (
                        "Home Loan",
                        &[
                            "home loan eligibility",
                            "disbursement process",
                            "fixed vs floating interest rates",
                            "property insurance requirements",
                            "EMI or repayment issues",
                        ],
                    ),
                    (
                        "Vehicle Loan",
                        &[
                            "car loan application",
                            "bike loan application",
                            "EMI details",
                            "vehicle insurance tie-ups",
                            "repossessions and defaults",
                        ],
                    ),
                    (
                        "Special Loan Schemes",
                        &[
                            "loans for armed forces",
                            "loans for pensioners",
                            "staff loan benefits",
                        ],
                    ),
                ]),
            ),
        ],
    },
    Topic {
        name: "Fraud & Security",
        base_priority: 8,
        sub_topics: &[
            (
                "Unauthorized Activity",
                Entries::Keywords(&[
                    "fraudulent transaction",
                    "account hack",
                    "phishing attempt",
                    "scam alerts",
                    "OTP misuse",
                    "SIM swap issue",
                    "suspicious login",
                ]),
            ),
            (
                "Disputes & Chargebacks",
                Entries::Keywords(&[
                    "transaction dispute",
                    "chargeback process",
                    "dispute resolution timeline",
                    "fraud case escalation",
                ]),
            ),
            (
                "Security Enhancements",
                Entries::Keywords(&[
                    "enable 2FA",
                    "biometric login security",
                    "account monitoring setup",
                    "security advice",
                ]),
            ),
        ],
    },
    Topic {
        name: "Customer Support & Complaints",
        base_priority: 3,
        sub_topics: &[
            (
                "General Complaints",
                Entries::Keywords(&[
                    "complaint registration",
                    "service dissatisfaction",
                    "branch complaint",
                    "staff complaint",
                    "grievance escalation",
                ]),
            ),
            (
                "Technical Support",
                Entries::Keywords(&[
                    "login issues",
                    "password reset assistance",
                    "app bug reports",
                    "online banking feature not working",
                ]),
            ),
            (
                "Feedback & Suggestions",
                Entries::Keywords(&[
                    "product suggestion",
                    "service improvement feedback",
                    "website feedback",
                    "mobile app feedback",
                ]),
            ),
        ],
    },
    Topic {
        name: "Internet & Mobile Banking",
        base_priority: 4,
        sub_topics: &[
            (
                "Net Banking",
                Entries::Keywords(&[
                    "net banking registration",
                    "transaction limit increase",
                    "two-factor authentication setup",
                    "password reset or unlock",
                    "statement download issue",
                ]),
            ),
            (
                "Mobile App",
                Entries::Keywords(&[
                    "mobile app activation",
                    "fingerprint login setup",
                    "payment errors or failed UPI",
                    "app crash or performance issue",
                ]),
            ),
            (
                "Online Services",
                Entries::Keywords(&[
                    "e-statement subscription",
                    "request new checkbook online",
                    "virtual debit card",
                    "bill pay integration",
                ]),
            ),
        ],
    },
    Topic {
        name: "Investment & Insurance",
        base_priority: 3,
        sub_topics: &[
            (
                "Mutual Funds",
                Entries::Keywords(&[
                    "fund selection advice",
                    "SIP setup",
                    "redemption process",
                    "fund performance inquiries",
                    "NAV queries",
                ]),
            ),
            (
                "Fixed Deposit (FD)",
                Entries::Keywords(&[
                    "FD opening process",
                    "premature withdrawal",
                    "interest payout schedule",
                    "FD renewal or extension",
                    "maturity instructions",
                ]),
            ),
            (
                "Recurring Deposit (RD)",
                Entries::Keywords(&[
                    "RD opening",
                    "installment queries",
                    "default handling",
                    "maturity payout",
                ]),
            ),
            (
                "Insurance",
                Entries::Keywords(&[
                    "policy coverage details",
                    "premium payment",
                    "claim process",
                    "nominee updates",
                    "ULIP queries",
                ]),
            ),
        ],
    },
    Topic {
        name: FALLBACK_TOPIC,
        base_priority: 1,
        sub_topics: &[
            (
                "General Inquiries",
                Entries::Keywords(&[
                    "lobby or branch-related questions",
                    "ATM location or service issue",
                    "marketing calls",
                    "promotional offers",
                ]),
            ),
            (
                "Non-Financial Requests",
                Entries::Keywords(&[
                    "change of name or contact details",
                    "address proof submission",
                    "request for official letters",
                    "miscellaneous certification",
                ]),
            ),
            (
                "Special Requests",
                Entries::Keywords(&[
                    "armed forces special assistance",
                    "pensioner special assistance",
                    "VIP or HNI queries",
                ]),
            ),
        ],
    },
];

const SUB_TOPIC_BOOSTS: &[(&str, i32)] = &[
    ("Unauthorized Activity", 2),
    ("Disputes & Chargebacks", 1),
    ("Credit Cards", 1),
    ("Debit Cards", 0),
    ("Home Loan", 1),
    ("Personal Loan", 0),
    ("Vehicle Loan", 0),
];

const SYNONYMS: &[(&str, &str)] = &[
    ("create", "open"),
    ("make", "open"),
    ("new", "open"),
    ("start", "open"),
    ("begin", "open"),
    ("end", "close"),
    ("problem", "issue"),
    ("trouble", "issue"),
    ("difficulty", "issue"),
];

/// How urgently the customer needs an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Needs immediate attention.
    Urgent,
    /// Above the normal queue.
    High,
    /// Default queue position.
    #[default]
    Normal,
    /// Can wait.
    Low,
}

impl Urgency {
    fn points(self) -> i32 {
        match self {
            Self::Urgent => 3,
            Self::High => 2,
            Self::Normal => 0,
            Self::Low => -1,
        }
    }
}

/// Error returned when an urgency label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("urgency must be one of urgent, high, normal, low; got {0:?}")]
pub struct ParseUrgencyError(String);

impl FromStr for Urgency {
    type Err = ParseUrgencyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "urgent" => Ok(Self::Urgent),
            "high" => Ok(Self::High),
            "normal" => Ok(Self::Normal),
            "low" => Ok(Self::Low),
            _ => Err(ParseUrgencyError(value.to_owned())),
        }
    }
}

/// Classification result: main topic, optional sub topic, optional nested
/// topic.
///
/// # Examples
/// ```
/// use bankdesk::domain::triage::classify;
///
/// let topic = classify("Block credit card now!");
/// assert_eq!(topic.segments(), ["Cards & Loans", "Credit Cards"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicPath(Vec<String>);

impl TopicPath {
    /// The fallback path used when nothing in the taxonomy matches.
    #[must_use]
    pub fn fallback() -> Self {
        Self(vec![FALLBACK_TOPIC.to_owned()])
    }

    /// Rebuild a path from stored segments; empty input yields the fallback.
    #[must_use]
    pub fn from_segments(segments: Vec<String>) -> Self {
        if segments.is_empty() {
            Self::fallback()
        } else {
            Self(segments)
        }
    }

    fn from_static(segments: &[&str]) -> Self {
        Self(segments.iter().map(|segment| (*segment).to_owned()).collect())
    }

    /// Path segments from the main topic downwards.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The main topic.
    #[must_use]
    pub fn main(&self) -> &str {
        self.0.first().map_or(FALLBACK_TOPIC, String::as_str)
    }
}

impl fmt::Display for TopicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" / "))
    }
}

/// Ticket priority in `PRIORITY_MIN..=PRIORITY_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    /// Clamp an arbitrary score into the priority range.
    #[must_use]
    pub fn clamped(score: i32) -> Self {
        let bounded = score.clamp(i32::from(PRIORITY_MIN), i32::from(PRIORITY_MAX));
        Self(u8::try_from(bounded).unwrap_or(PRIORITY_MIN))
    }

    /// Numeric value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Classify `query` into the taxonomy.
#[must_use]
pub fn classify(query: &str) -> TopicPath {
    let tokens: Vec<String> = tokenize(query).into_iter().map(replace_synonym).collect();
    if tokens.is_empty() {
        return TopicPath::fallback();
    }

    let mut best_score = 0.0;
    let mut best_path = TopicPath::fallback();
    let mut consider = |keyword: &str, path: &[&str]| {
        let score = coverage(keyword, &tokens);
        if score > best_score {
            best_score = score;
            best_path = TopicPath::from_static(path);
        }
    };

    for topic in TAXONOMY {
        for (sub_name, entries) in topic.sub_topics {
            match entries {
                Entries::Keywords(keywords) => {
                    for keyword in *keywords {
                        consider(keyword, &[topic.name, sub_name]);
                    }
                }
                Entries::Nested(groups) => {
                    for (nested_name, keywords) in *groups {
                        for keyword in *keywords {
                            consider(keyword, &[topic.name, sub_name, nested_name]);
                        }
                    }
                }
            }
        }
    }

    if best_score < MIN_COVERAGE {
        return TopicPath::fallback();
    }
    best_path
}

/// Score a classified topic for the given urgency.
///
/// # Examples
/// ```
/// use bankdesk::domain::triage::{Urgency, classify, priority};
///
/// let topic = classify("There's a fraudulent transaction on my account");
/// assert_eq!(priority(&topic, Urgency::Normal).value(), 10);
/// ```
#[must_use]
pub fn priority(topic: &TopicPath, urgency: Urgency) -> Priority {
    let base = TAXONOMY
        .iter()
        .find(|candidate| candidate.name == topic.main())
        .map_or(1, |candidate| candidate.base_priority);
    let boost: i32 = topic
        .segments()
        .iter()
        .skip(1)
        .map(|segment| {
            SUB_TOPIC_BOOSTS
                .iter()
                .find(|(name, _)| name == segment)
                .map_or(0, |(_, points)| *points)
        })
        .sum();
    Priority::clamped(base + boost + urgency.points())
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

fn replace_synonym(token: String) -> String {
    SYNONYMS
        .iter()
        .find(|(word, _)| *word == token)
        .map_or(token, |(_, canonical)| (*canonical).to_owned())
}

fn coverage(keyword: &str, query_tokens: &[String]) -> f64 {
    let keyword_tokens = tokenize(keyword);
    if keyword_tokens.is_empty() {
        return 0.0;
    }
    let matched = keyword_tokens
        .iter()
        .filter(|keyword_token| {
            query_tokens
                .iter()
                .map(|query_token| similarity(keyword_token, query_token))
                .fold(0.0, f64::max)
                >= TOKEN_MATCH_THRESHOLD
        })
        .count();
    matched as f64 / keyword_tokens.len() as f64
}

/// Ratcliff/Obershelp similarity in `[0, 1]`.
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * matching_characters(&a, &b)) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, size) = longest_common_block(a, b);
    if size == 0 {
        return 0;
    }
    let (a_left, a_rest) = a.split_at(a_start);
    let (b_left, b_rest) = b.split_at(b_start);
    let (_, a_right) = a_rest.split_at(size);
    let (_, b_right) = b_rest.split_at(size);
    size + matching_characters(a_left, b_left) + matching_characters(a_right, b_right)
}

/// Longest common contiguous block, earliest in `a` then in `b` on ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut previous = vec![0_usize; b.len() + 1];
    for (i, a_char) in a.iter().enumerate() {
        let mut current = vec![0_usize; b.len() + 1];
        for (j, b_char) in b.iter().enumerate() {
            if a_char != b_char {
                continue;
            }
            let run = previous.get(j).copied().unwrap_or(0) + 1;
            if let Some(slot) = current.get_mut(j + 1) {
                *slot = run;
            }
            if run > best.2 {
                best = (i + 1 - run, j + 1 - run, run);
            }
        }
        previous = current;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abcd", "abcd", 1.0)]
    #[case("abcd", "wxyz", 0.0)]
    #[case("fraud", "fraudulent", 10.0 / 15.0)]
    #[case("", "", 1.0)]
    fn similarity_matches_ratcliff_obershelp(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert!((similarity(a, b) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn tokenize_lowercases_and_splits_on_punctuation() {
        assert_eq!(
            tokenize("Top-up LOAN, request_2!"),
            vec!["top", "up", "loan", "request_2"]
        );
    }

    #[rstest]
    #[case("Block credit card now!", &["Cards & Loans", "Credit Cards"])]
    #[case(
        "There's a fraudulent transaction on my account",
        &["Fraud & Security", "Unauthorized Activity"]
    )]
    #[case("How to create a bank account?", &["Account-Related", "Personal Accounts"])]
    #[case("xyzzy plugh", &["Others"])]
    #[case("   ", &["Others"])]
    fn classify_picks_best_covered_keyword(#[case] query: &str, #[case] expected: &[&str]) {
        let topic = classify(query);
        assert_eq!(topic.segments(), expected);
    }

    #[rstest]
    #[case(&["Cards & Loans", "Credit Cards"], Urgency::Normal, 7)]
    #[case(&["Fraud & Security", "Unauthorized Activity"], Urgency::Urgent, 10)]
    #[case(&["Cards & Loans", "Loans", "Home Loan"], Urgency::High, 9)]
    #[case(&["Others"], Urgency::Low, 1)]
    #[case(&["Unknown"], Urgency::Normal, 1)]
    fn priority_combines_base_boosts_and_urgency(
        #[case] path: &[&str],
        #[case] urgency: Urgency,
        #[case] expected: u8,
    ) {
        let topic = TopicPath::from_static(path);
        assert_eq!(priority(&topic, urgency).value(), expected);
    }

    #[rstest]
    #[case("URGENT", Urgency::Urgent)]
    #[case(" low ", Urgency::Low)]
    fn urgency_parses_case_insensitively(#[case] raw: &str, #[case] expected: Urgency) {
        assert_eq!(raw.parse::<Urgency>(), Ok(expected));
    }

    #[rstest]
    fn urgency_rejects_unknown_labels() {
        assert!("asap".parse::<Urgency>().is_err());
    }
}
