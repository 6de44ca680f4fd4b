//! Book-name resolution: full names, standard abbreviations and common aliases.

use std::collections::HashMap;
use std::sync::LazyLock;

// Canonical name followed by its aliases. Aliases are written already normalized
// (lower-case, no periods, no spaces). Prefixes shared by two books (`ju`, `jud`, `ph`,
// `jo`, ...) are left out so they resolve to nothing, as are short English words
// (`am`, `is`, `so`) that show up in front of clock times.
const BOOKS: &[(&str, &[&str])] = &[
    ("Genesis", &["gen", "ge", "gn"]),
    ("Exodus", &["exod", "exo", "ex"]),
    ("Leviticus", &["lev", "le", "lv"]),
    ("Numbers", &["num", "nu", "nm", "numb"]),
    ("Deuteronomy", &["deut", "deu", "dt"]),
    ("Joshua", &["josh", "jos", "jsh"]),
    ("Judges", &["judg", "jdg", "jg", "jdgs"]),
    ("Ruth", &["rth", "ru"]),
    ("1 Samuel", &["1sam", "1sa", "1sm", "1s", "firstsamuel", "isamuel"]),
    ("2 Samuel", &["2sam", "2sa", "2sm", "secondsamuel", "iisamuel"]),
    ("1 Kings", &["1kgs", "1ki", "1kin", "1k", "firstkings", "ikings"]),
    ("2 Kings", &["2kgs", "2ki", "2kin", "secondkings", "iikings"]),
    ("1 Chronicles", &["1chron", "1chr", "1ch", "firstchronicles", "ichronicles"]),
    ("2 Chronicles", &["2chron", "2chr", "2ch", "secondchronicles", "iichronicles"]),
    ("Ezra", &["ezr", "ez"]),
    ("Nehemiah", &["neh", "ne"]),
    ("Esther", &["esth", "est", "es"]),
    ("Job", &["jb"]),
    ("Psalms", &["psalm", "ps", "psa", "pss", "psm", "pslm"]),
    ("Proverbs", &["prov", "pro", "prv", "pr"]),
    ("Ecclesiastes", &["eccles", "eccle", "ecc", "ec", "qoh", "qoheleth"]),
    ("Song of Solomon", &["song", "songofsongs", "sos", "canticles", "canticleofcanticles"]),
    ("Isaiah", &["isa"]),
    ("Jeremiah", &["jer", "je", "jr"]),
    ("Lamentations", &["lam", "la"]),
    ("Ezekiel", &["ezek", "eze", "ezk"]),
    ("Daniel", &["dan", "da", "dn"]),
    ("Hosea", &["hos", "ho"]),
    ("Joel", &["jl"]),
    ("Amos", &["amo"]),
    ("Obadiah", &["obad", "ob"]),
    ("Jonah", &["jnh", "jon"]),
    ("Micah", &["mic", "mc"]),
    ("Nahum", &["nah", "na"]),
    ("Habakkuk", &["hab", "hb"]),
    ("Zephaniah", &["zeph", "zep", "zp"]),
    ("Haggai", &["hag", "hg"]),
    ("Zechariah", &["zech", "zec", "zc"]),
    ("Malachi", &["mal", "ml"]),
    ("Tobit", &["tob", "tb"]),
    ("Judith", &["jdt", "jdth"]),
    ("Wisdom", &["wis", "ws", "wisdomofsolomon"]),
    ("Sirach", &["sir", "ecclesiasticus", "ecclus"]),
    ("Baruch", &["bar"]),
    ("1 Maccabees", &["1macc", "1mac", "1ma", "1m", "firstmaccabees", "imaccabees"]),
    ("2 Maccabees", &["2macc", "2mac", "2ma", "2m", "secondmaccabees", "iimaccabees"]),
    ("Matthew", &["matt", "mt"]),
    ("Mark", &["mrk", "mar", "mk", "mr"]),
    ("Luke", &["luk", "lk"]),
    ("John", &["joh", "jhn", "jn"]),
    ("Acts", &["act", "ac"]),
    ("Romans", &["rom", "ro", "rm"]),
    ("1 Corinthians", &["1cor", "1co", "firstcorinthians", "icorinthians"]),
    ("2 Corinthians", &["2cor", "2co", "secondcorinthians", "iicorinthians"]),
    ("Galatians", &["gal", "ga"]),
    ("Ephesians", &["eph", "ephes"]),
    ("Philippians", &["phil", "php", "pp"]),
    ("Colossians", &["col"]),
    ("1 Thessalonians", &["1thess", "1thes", "1th", "firstthessalonians", "ithessalonians"]),
    ("2 Thessalonians", &["2thess", "2thes", "2th", "secondthessalonians", "iithessalonians"]),
    ("1 Timothy", &["1tim", "1ti", "firsttimothy", "itimothy"]),
    ("2 Timothy", &["2tim", "2ti", "secondtimothy", "iitimothy"]),
    ("Titus", &["tit", "ti"]),
    ("Philemon", &["philem", "phm", "pm"]),
    ("Hebrews", &["heb"]),
    ("James", &["jas", "jm"]),
    ("1 Peter", &["1pet", "1pe", "1pt", "1p", "firstpeter", "ipeter"]),
    ("2 Peter", &["2pet", "2pe", "2pt", "2p", "secondpeter", "iipeter"]),
    ("1 John", &["1jn", "1jhn", "1joh", "1jo", "firstjohn", "ijohn"]),
    ("2 John", &["2jn", "2jhn", "2joh", "2jo", "secondjohn", "iijohn"]),
    ("3 John", &["3jn", "3jhn", "3joh", "3jo", "thirdjohn", "iiijohn"]),
    ("Jude", &["jde"]),
    ("Revelation", &["rev", "re", "revelations", "apocalypse"]),
];

// Never resolvable, even if a future alias would introduce them.
const AMBIGUOUS: &[&str] = &["jud", "ju", "ph", "jo", "ma", "co"];

static ALIASES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (canonical, aliases) in BOOKS {
        map.insert(normalize(canonical), *canonical);
        for alias in *aliases {
            map.insert((*alias).to_string(), *canonical);
        }
    }
    for token in AMBIGUOUS {
        map.remove(*token);
    }
    map
});

fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolve a raw book token to its canonical name. Unknown or ambiguous tokens give `None`.
pub fn get_book(token: &str) -> Option<&'static str> {
    ALIASES.get(&normalize(token)).copied()
}

/// Every canonical book name, in canonical order.
pub fn all_books() -> impl Iterator<Item = &'static str> {
    BOOKS.iter().map(|(name, _)| *name)
}
