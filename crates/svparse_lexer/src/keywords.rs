//! Keyword lookup table.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;
use svparse_ast::TokenKind;

static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();

/// Look up the keyword kind for an identifier, if it is a keyword.
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    let table = KEYWORDS.get_or_init(build_table);
    table.get(text).copied()
}

fn build_table() -> FxHashMap<&'static str, TokenKind> {
    use TokenKind::*;
    let entries: &[(&'static str, TokenKind)] = &[
        ("accept_on", AcceptOnKeyword),
        ("always", AlwaysKeyword),
        ("and", AndKeyword),
        ("bit", BitKeyword),
        ("byte", ByteKeyword),
        ("case", CaseKeyword),
        ("chandle", CHandleKeyword),
        ("const", ConstKeyword),
        ("default", DefaultKeyword),
        ("dist", DistKeyword),
        ("edge", EdgeKeyword),
        ("else", ElseKeyword),
        ("endcase", EndCaseKeyword),
        ("event", EventKeyword),
        ("eventually", EventuallyKeyword),
        ("first_match", FirstMatchKeyword),
        ("iff", IffKeyword),
        ("if", IfKeyword),
        ("implies", ImpliesKeyword),
        ("inside", InsideKeyword),
        ("integer", IntegerKeyword),
        ("intersect", IntersectKeyword),
        ("int", IntKeyword),
        ("local", LocalKeyword),
        ("logic", LogicKeyword),
        ("longint", LongIntKeyword),
        ("matches", MatchesKeyword),
        ("negedge", NegEdgeKeyword),
        ("new", NewKeyword),
        ("nexttime", NextTimeKeyword),
        ("not", NotKeyword),
        ("null", NullKeyword),
        ("or", OrKeyword),
        ("posedge", PosEdgeKeyword),
        ("real", RealKeyword),
        ("realtime", RealTimeKeyword),
        ("reg", RegKeyword),
        ("reject_on", RejectOnKeyword),
        ("repeat", RepeatKeyword),
        ("s_always", SAlwaysKeyword),
        ("s_eventually", SEventuallyKeyword),
        ("shortint", ShortIntKeyword),
        ("shortreal", ShortRealKeyword),
        ("signed", SignedKeyword),
        ("s_nexttime", SNextTimeKeyword),
        ("string", StringKeyword),
        ("strong", StrongKeyword),
        ("s_until", SUntilKeyword),
        ("s_until_with", SUntilWithKeyword),
        ("super", SuperKeyword),
        ("sync_accept_on", SyncAcceptOnKeyword),
        ("sync_reject_on", SyncRejectOnKeyword),
        ("tagged", TaggedKeyword),
        ("this", ThisKeyword),
        ("throughout", ThroughoutKeyword),
        ("time", TimeKeyword),
        ("unique", UniqueKeyword),
        ("unsigned", UnsignedKeyword),
        ("until", UntilKeyword),
        ("until_with", UntilWithKeyword),
        ("void", VoidKeyword),
        ("weak", WeakKeyword),
        ("within", WithinKeyword),
        ("with", WithKeyword),
        ("xor", XorKeyword),
    ];
    entries.iter().copied().collect()
}
