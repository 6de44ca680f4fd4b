mod common;

use common::{FakePlatform, FakeSource, harness, harness_with, mention};
use versebot::bible::catalog::TranslationTable;
use versebot::bible::extract::extract;
use versebot::bible::provider::SourceError;
use versebot::bible::response::Response;
use versebot::bible::verse::{TranslationToken, VerseSpan};
use versebot::bible::{Requester, resolve};
use versebot::commands::{Quotation, quote_verses};

#[test]
fn extractor_is_ordered_lazy_and_restartable() {
    let text = "Compare Romans 8:28, 1 Cor 13:4-7 [ESV] and John 3:16";
    let mut refs = extract(text);
    let first = refs.next().expect("first reference");
    assert_eq!(first.book, "Romans");
    assert_eq!((first.chapter, first.verses), (8, VerseSpan::Single(28)));

    let rest_a: Vec<_> = refs.clone().collect();
    let rest_b: Vec<_> = refs.collect();
    assert_eq!(rest_a, rest_b);
    assert_eq!(rest_a.len(), 2);
    assert_eq!(rest_a[0].verses, VerseSpan::Range(4, 7));
    assert_eq!(
        rest_a[0].translation,
        Some(TranslationToken::Delimited("ESV".to_string()))
    );
    assert_eq!(rest_a[1].book, "John");
}

#[test]
fn extractor_skips_malformed_candidates() {
    assert_eq!(extract("").count(), 0);
    assert_eq!(extract("Random chat, no verses here").count(), 0);
    let found: Vec<_> = extract("John 3:0 and Gen 5:3-1 but Ps 23:1").collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].book, "Ps");
}

#[tokio::test]
async fn repeated_reference_is_quoted_once() {
    let h = harness(FakePlatform::default()).await;
    let message = mention("t1_dup1", "reader", "Check out John 3:16 NIV and john 3:16 niv");

    let Quotation::Reply(reply) = quote_verses(&h.state, &message, &message.body, Some("Bible")).await else {
        panic!("expected a reply");
    };
    assert_eq!(reply.matches("**John 3:16 | New International Version**").count(), 1);
    assert_eq!(h.source.lookups(), 1);
}

#[tokio::test]
async fn response_rejects_structural_duplicates() {
    let h = harness(FakePlatform::default()).await;
    let message = mention("t1_dup2", "reader", "");
    let table = h.state.catalog.snapshot().await;
    let permalink = message.permalink();
    let requester = Requester {
        user: "reader",
        subreddit: Some("Bible"),
        permalink: &permalink,
    };
    let mut response = Response::new(&message, &h.state.fetcher, table.clone(), &h.state.layout);
    for raw in extract("John 3:16 (NIV) Jn 3:16 NIV John 3:16 KJV John 3:16-16") {
        if let Some(verse) = resolve(&raw, &table, "KJV", requester) {
            response.add_verse(verse);
        }
    }
    let refs: Vec<_> = response
        .verses()
        .iter()
        .map(|v| format!("{} {}", v.reference(), v.translation))
        .collect();
    // 3:16-16 is kept as a range, distinct from the single verse.
    assert_eq!(refs, ["John 3:16 NIV", "John 3:16 KJV", "John 3:16-16 KJV"]);
}

#[tokio::test]
async fn default_translation_applies_in_order() {
    let h = harness(FakePlatform::default()).await;
    let message = mention("t1_kjv1", "reader", "Gen 1:1-2 and Exodus 20:1");

    let Quotation::Reply(reply) = quote_verses(&h.state, &message, &message.body, Some("Bible")).await else {
        panic!("expected a reply");
    };
    let genesis = reply
        .find("**Genesis 1:1-2 | King James Version**")
        .expect("genesis block");
    let exodus = reply
        .find("**Exodus 20:1 | King James Version**")
        .expect("exodus block");
    assert!(genesis < exodus);
    assert!(reply.ends_with(&h.state.layout.footer));
}

#[tokio::test]
async fn user_default_beats_subreddit_default() {
    use versebot::database::PreferenceStore;

    let h = harness(FakePlatform::default()).await;
    h.store.set_subreddit_translation("bible", "NIV").await.unwrap();
    let message = mention("t1_pref1", "reader", "John 3:16");
    let Quotation::Reply(reply) = quote_verses(&h.state, &message, &message.body, Some("Bible")).await else {
        panic!("expected a reply");
    };
    assert!(reply.contains("New International Version"));

    h.store.set_user_translation("Reader", "KJV").await.unwrap();
    let Quotation::Reply(reply) = quote_verses(&h.state, &message, &message.body, Some("Bible")).await else {
        panic!("expected a reply");
    };
    assert!(reply.contains("King James Version"));
}

#[tokio::test]
async fn unfound_and_unresolved_references_stay_quiet() {
    let h = harness(FakePlatform::default()).await;
    let message = mention("t1_none1", "reader", "Obadiah 1:99 and Hezekiah 4:2 and John 3:16 (XYZ)");
    assert_eq!(
        quote_verses(&h.state, &message, &message.body, Some("Bible")).await,
        Quotation::Nothing
    );
    let message = mention("t1_none2", "reader", "nothing to see");
    assert_eq!(
        quote_verses(&h.state, &message, &message.body, Some("Bible")).await,
        Quotation::NoReferences
    );
}

#[tokio::test]
async fn construct_message_is_idempotent_and_bounded() {
    let long = "word ".repeat(300);
    let source = FakeSource::new()
        .with_passage("Genesis 1:1|KJV", &long)
        .with_passage("Genesis 1:2|KJV", &long)
        .with_passage("Genesis 1:3|KJV", &long);
    let max = 4_000;
    let h = harness_with(FakePlatform::default(), source, max).await;
    let message = mention("t1_long1", "reader", "Gen 1:1, Gen 1:2, Gen 1:3");
    let table = h.state.catalog.snapshot().await;
    let permalink = message.permalink();
    let requester = Requester {
        user: "reader",
        subreddit: None,
        permalink: &permalink,
    };
    let mut response = Response::new(&message, &h.state.fetcher, table.clone(), &h.state.layout);
    for raw in extract(&message.body) {
        response.add_verse(resolve(&raw, &table, "KJV", requester).expect("resolves"));
    }

    let first = response.construct_message().await.expect("reply");
    let second = response.construct_message().await.expect("reply");
    assert_eq!(first, second);
    assert!(first.chars().count() <= max);
    assert!(first.contains("**Genesis 1:1 | King James Version**"));
    assert!(!first.contains("**Genesis 1:3 | King James Version**"));
}

#[tokio::test]
async fn refreshed_catalog_is_archived() {
    let h = harness(FakePlatform::default()).await;
    let codes: Vec<_> = h
        .store
        .archived_translations()
        .await
        .into_iter()
        .map(|t| t.code)
        .collect();
    assert_eq!(codes, ["ESV", "KJV", "NIV", "WEB"]);
    assert_eq!(h.state.catalog.default_code(), "KJV");
}

fn sorted_codes(table: &TranslationTable) -> Vec<String> {
    let mut codes: Vec<_> = table.iter().map(|t| t.code.clone()).collect();
    codes.sort();
    codes
}

#[tokio::test]
async fn failed_refresh_keeps_previous_catalog() {
    let h = harness(FakePlatform::default()).await;
    let before = sorted_codes(&*h.state.catalog.snapshot().await);

    h.source.empty_listing();
    assert!(matches!(
        h.state.refresh_catalog().await,
        Err(SourceError::EmptyListing)
    ));

    h.source.take_listing_down();
    assert!(matches!(
        h.state.refresh_catalog().await,
        Err(SourceError::Status(_))
    ));

    assert_eq!(sorted_codes(&*h.state.catalog.snapshot().await), before);
    let archived: Vec<_> = h
        .store
        .archived_translations()
        .await
        .into_iter()
        .map(|t| t.code)
        .collect();
    assert_eq!(archived, before);

    let message = mention("t1_keep1", "reader", "John 3:16 NIV");
    let Quotation::Reply(reply) = quote_verses(&h.state, &message, &message.body, Some("Bible")).await else {
        panic!("expected a reply");
    };
    assert!(reply.contains("New International Version"));
}
