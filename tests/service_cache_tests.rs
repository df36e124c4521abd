//! Service-level cache behavior, measured in backing-store calls.

mod common;

use std::time::Duration;

use bookmark_cache::cache::CacheName;
use bookmark_cache::models::{
    BookmarkUpdateRequest, Order, PageRequest, Sort, TagUpsertRequest,
};
use common::{counting_service, create_request, short_ttl_service};

fn newest_first(page: u32) -> PageRequest {
    PageRequest::sorted(page, 20, Sort::by([Order::desc("createdAt")]))
}

// == Hits ==

#[tokio::test]
async fn test_repeated_eligible_reads_hit_the_store_once() {
    let service = counting_service();
    let id = service
        .create_bookmark(create_request("Rust", "https://rust-lang.org"))
        .await
        .unwrap()
        .id;
    service
        .add_tags(id, TagUpsertRequest { names: vec!["lang".into()] })
        .await
        .unwrap();
    let repo = service.repository().clone();

    service.get_bookmark(id).await.unwrap();
    service.get_bookmark(id).await.unwrap();
    assert_eq!(repo.by_id_reads(), 1);

    service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    assert_eq!(repo.page_reads(), 1);

    service.get_bookmarks(Some("rust"), &newest_first(2)).await.unwrap();
    service.get_bookmarks(Some("rust"), &newest_first(2)).await.unwrap();
    assert_eq!(repo.page_reads(), 2);

    service.get_bookmarks_by_tag("lang", &newest_first(0)).await.unwrap();
    service.get_bookmarks_by_tag("lang", &newest_first(0)).await.unwrap();
    assert_eq!(repo.page_reads(), 3);
}

// == Eligibility ==

#[tokio::test]
async fn test_second_page_without_search_is_never_cached() {
    let service = counting_service();
    let repo = service.repository().clone();

    service.get_bookmarks(None, &newest_first(1)).await.unwrap();
    service.get_bookmarks(None, &newest_first(1)).await.unwrap();

    assert_eq!(repo.page_reads(), 2);
    let stats = service.registry().stats(CacheName::FirstPage).await;
    assert_eq!(stats.request_count(), 0);
    assert_eq!(stats.total_entries, 0);
}

#[tokio::test]
async fn test_search_eligibility_boundary() {
    let service = counting_service();
    let repo = service.repository().clone();

    // One-character term
    service.get_bookmarks(Some("r"), &newest_first(0)).await.unwrap();
    service.get_bookmarks(Some("r"), &newest_first(0)).await.unwrap();
    assert_eq!(repo.page_reads(), 2);

    // Two characters on the last eligible page
    service.get_bookmarks(Some("ru"), &newest_first(2)).await.unwrap();
    service.get_bookmarks(Some("ru"), &newest_first(2)).await.unwrap();
    assert_eq!(repo.page_reads(), 3);

    // Page three, whatever the term
    service.get_bookmarks(Some("rustacean"), &newest_first(3)).await.unwrap();
    service.get_bookmarks(Some("rustacean"), &newest_first(3)).await.unwrap();
    assert_eq!(repo.page_reads(), 5);
}

#[tokio::test]
async fn test_tag_listing_past_page_two_is_not_cached() {
    let service = counting_service();
    let repo = service.repository().clone();

    service.get_bookmarks_by_tag("lang", &newest_first(3)).await.unwrap();
    service.get_bookmarks_by_tag("lang", &newest_first(3)).await.unwrap();

    assert_eq!(repo.page_reads(), 2);
}

#[tokio::test]
async fn test_different_sort_is_a_different_entry() {
    let service = counting_service();
    let repo = service.repository().clone();

    service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    service
        .get_bookmarks(None, &PageRequest::sorted(0, 20, Sort::by([Order::asc("title")])))
        .await
        .unwrap();
    service.get_bookmarks(None, &newest_first(0)).await.unwrap();

    assert_eq!(repo.page_reads(), 2);
    assert_eq!(service.registry().stats(CacheName::FirstPage).await.total_entries, 2);
}

// == Invalidation ==

#[tokio::test]
async fn test_create_clears_first_page() {
    let service = counting_service();
    let repo = service.repository().clone();

    let before = service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    assert_eq!(repo.page_reads(), 1);
    assert_eq!(before.total_elements, 0);

    service
        .create_bookmark(create_request("Rust", "https://rust-lang.org"))
        .await
        .unwrap();

    let after = service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    assert_eq!(repo.page_reads(), 2);
    assert_eq!(after.total_elements, 1);
}

#[tokio::test]
async fn test_update_evicts_only_its_own_entry() {
    let service = counting_service();
    let repo = service.repository().clone();
    let five = service
        .create_bookmark(create_request("Five", "https://five.dev"))
        .await
        .unwrap()
        .id;
    let six = service
        .create_bookmark(create_request("Six", "https://six.dev"))
        .await
        .unwrap()
        .id;

    service.get_bookmark(five).await.unwrap();
    service.get_bookmark(six).await.unwrap();
    assert_eq!(repo.by_id_reads(), 2);

    service
        .update_bookmark(
            five,
            BookmarkUpdateRequest {
                title: Some("Five again".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    service.get_bookmark(six).await.unwrap();
    assert_eq!(repo.by_id_reads(), 2);

    let refreshed = service.get_bookmark(five).await.unwrap();
    assert_eq!(repo.by_id_reads(), 3);
    assert_eq!(refreshed.title, "Five again");
}

#[tokio::test]
async fn test_tag_writes_clear_tag_listings() {
    let service = counting_service();
    let repo = service.repository().clone();
    let id = service
        .create_bookmark(create_request("Spring", "https://spring.io"))
        .await
        .unwrap()
        .id;

    let empty = service.get_bookmarks_by_tag("java", &newest_first(0)).await.unwrap();
    assert_eq!(empty.total_elements, 0);

    service
        .add_tags(id, TagUpsertRequest { names: vec!["Java".into()] })
        .await
        .unwrap();
    let tagged = service.get_bookmarks_by_tag("java", &newest_first(0)).await.unwrap();
    assert_eq!(tagged.total_elements, 1);
    assert_eq!(repo.page_reads(), 2);

    service.remove_tag(id, "java").await.unwrap();
    let untagged = service.get_bookmarks_by_tag("java", &newest_first(0)).await.unwrap();
    assert_eq!(untagged.total_elements, 0);
    assert_eq!(repo.page_reads(), 3);
}

#[tokio::test]
async fn test_failed_write_keeps_caches() {
    let service = counting_service();
    let repo = service.repository().clone();

    service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    assert!(service.delete_bookmark(77).await.is_err());
    service.get_bookmarks(None, &newest_first(0)).await.unwrap();

    assert_eq!(repo.page_reads(), 1);
}

#[tokio::test]
async fn test_not_found_is_never_cached() {
    let service = counting_service();
    let repo = service.repository().clone();

    assert!(service.get_bookmark(9).await.is_err());
    assert!(service.get_bookmark(9).await.is_err());

    assert_eq!(repo.by_id_reads(), 2);
}

// == Expiry ==

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let service = short_ttl_service(Duration::from_millis(100));
    let repo = service.repository().clone();

    service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    assert_eq!(repo.page_reads(), 1);

    tokio::time::sleep(Duration::from_millis(150)).await;

    service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    assert_eq!(repo.page_reads(), 2);
}

// == Transparency ==

#[tokio::test]
async fn test_cached_values_equal_direct_loads() {
    let service = counting_service();
    for (title, url) in [
        ("GitHub", "https://github.com"),
        ("GitLab", "https://gitlab.com"),
        ("Rust", "https://rust-lang.org"),
    ] {
        let id = service.create_bookmark(create_request(title, url)).await.unwrap().id;
        service
            .add_tags(id, TagUpsertRequest { names: vec!["dev".into()] })
            .await
            .unwrap();
    }

    let miss = service.get_bookmarks(Some("git"), &newest_first(0)).await.unwrap();
    let hit = service.get_bookmarks(Some("git"), &newest_first(0)).await.unwrap();
    assert_eq!(hit, miss);

    let miss = service.get_bookmarks_by_tag("dev", &newest_first(0)).await.unwrap();
    let hit = service.get_bookmarks_by_tag("dev", &newest_first(0)).await.unwrap();
    assert_eq!(hit, miss);

    let miss = service.get_bookmark(2).await.unwrap();
    let hit = service.get_bookmark(2).await.unwrap();
    assert_eq!(hit, miss);

    service.clear_caches().await;
    let direct = service.get_bookmark(2).await.unwrap();
    assert_eq!(direct, hit);
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reads_and_creates_keep_stats_consistent() {
    const CREATES: usize = 40;
    const READS: usize = 200;

    let service = counting_service();
    let repo = service.repository().clone();

    let mut tasks = Vec::new();
    for i in 0..CREATES {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            let url = format!("https://site{}.dev", i);
            service.create_bookmark(create_request("Site", &url)).await.unwrap();
        }));
    }
    for _ in 0..READS {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            service.get_bookmarks(None, &newest_first(0)).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let stats = service.registry().stats(CacheName::FirstPage).await;
    assert_eq!(stats.request_count(), READS as u64);
    assert_eq!(stats.misses as usize, repo.page_reads());

    let last = service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    assert_eq!(last.total_elements, CREATES as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_read_after_concurrent_create_sees_the_write() {
    const WRITERS: usize = 16;
    const ROUNDS: usize = 10;

    let service = counting_service();

    let mut tasks = Vec::new();
    for w in 0..WRITERS {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            for r in 0..ROUNDS {
                let url = format!("https://w{}-r{}.dev", w, r);
                let created = service.create_bookmark(create_request("Page", &url)).await.unwrap();

                // Ids are sequential and nothing is deleted
                let page = service.get_bookmarks(None, &newest_first(0)).await.unwrap();
                assert!(
                    page.total_elements >= created.id,
                    "stale first page: {} bookmarks after creating id {}",
                    page.total_elements,
                    created.id
                );
            }
        }));
    }
    // Readers keep refilling the first page while writers invalidate it
    for _ in 0..WRITERS {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..ROUNDS * 2 {
                service.get_bookmarks(None, &newest_first(0)).await.unwrap();
                tokio::task::yield_now().await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let last = service.get_bookmarks(None, &newest_first(0)).await.unwrap();
    assert_eq!(last.total_elements, (WRITERS * ROUNDS) as u64);
}
