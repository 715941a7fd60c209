//! Tests for the playlist service

mod helpers;

use helpers::{boss, count, seeded_db, student};
use songbook_common::{catalog, playlists, Error};

#[tokio::test]
async fn test_list_my_playlists_is_owner_scoped() {
    let (pool, _dir) = seeded_db().await;
    let admin = boss(&pool).await;
    let user = student(&pool).await;

    playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap();
    playlists::create_playlist(&pool, &user, Some("Workout")).await.unwrap();
    playlists::create_playlist(&pool, &admin, Some("Office")).await.unwrap();

    let mine = playlists::list_my_playlists(&pool, &user).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|p| p.owner_id == user.user_id));

    let theirs = playlists::list_my_playlists(&pool, &admin).await.unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].name, "Office");
}

#[tokio::test]
async fn test_blank_playlist_name_is_a_no_op() {
    let (pool, _dir) = seeded_db().await;
    let user = student(&pool).await;

    assert!(playlists::create_playlist(&pool, &user, None).await.unwrap().is_none());
    assert!(playlists::create_playlist(&pool, &user, Some("")).await.unwrap().is_none());
    assert_eq!(count(&pool, "playlists").await, 0);
}

#[tokio::test]
async fn test_view_playlist_checks() {
    let (pool, _dir) = seeded_db().await;
    let admin = boss(&pool).await;
    let user = student(&pool).await;

    let favorites = playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap().unwrap();

    assert!(matches!(
        playlists::view_playlist(&pool, &user, 9999).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        playlists::view_playlist(&pool, &admin, favorites.id).await,
        Err(Error::AccessDenied(_)),
    ));

    let detail = playlists::view_playlist(&pool, &user, favorites.id).await.unwrap();
    assert_eq!(detail.playlist, favorites);
    assert!(detail.entries.is_empty());
}

#[tokio::test]
async fn test_add_item_allows_duplicates() {
    let (pool, _dir) = seeded_db().await;
    let admin = boss(&pool).await;
    let user = student(&pool).await;

    let song = catalog::add_song(&pool, &admin, Some("Imagine"), Some("Lennon")).await.unwrap().unwrap();
    let favorites = playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap().unwrap();

    playlists::add_item(&pool, &user, Some(song.id), Some(favorites.id)).await.unwrap();
    playlists::add_item(&pool, &user, Some(song.id), Some(favorites.id)).await.unwrap();

    let detail = playlists::view_playlist(&pool, &user, favorites.id).await.unwrap();
    assert_eq!(detail.entries.len(), 2);
    assert!(detail.entries.iter().all(|e| e.title == "Imagine" && e.artist == "Lennon"));
    assert!(detail.entries[0].item_id < detail.entries[1].item_id);
}

#[tokio::test]
async fn test_add_item_missing_ids_is_a_no_op() {
    let (pool, _dir) = seeded_db().await;
    let user = student(&pool).await;

    let favorites = playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap().unwrap();

    assert!(playlists::add_item(&pool, &user, None, Some(favorites.id)).await.unwrap().is_none());
    assert!(playlists::add_item(&pool, &user, Some(1), None).await.unwrap().is_none());
    assert_eq!(count(&pool, "playlist_items").await, 0);
}

#[tokio::test]
async fn test_add_item_unknown_references() {
    let (pool, _dir) = seeded_db().await;
    let admin = boss(&pool).await;
    let user = student(&pool).await;

    let song = catalog::add_song(&pool, &admin, Some("Imagine"), Some("Lennon")).await.unwrap().unwrap();
    let favorites = playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap().unwrap();

    assert!(matches!(
        playlists::add_item(&pool, &user, Some(song.id), Some(9999)).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        playlists::add_item(&pool, &user, Some(9999), Some(favorites.id)).await,
        Err(Error::NotFound(_))
    ));
    assert_eq!(count(&pool, "playlist_items").await, 0);
}

#[tokio::test]
async fn test_item_mutations_require_ownership() {
    let (pool, _dir) = seeded_db().await;
    let admin = boss(&pool).await;
    let user = student(&pool).await;

    let song = catalog::add_song(&pool, &admin, Some("Imagine"), Some("Lennon")).await.unwrap().unwrap();
    let favorites = playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap().unwrap();

    assert!(matches!(
        playlists::add_item(&pool, &admin, Some(song.id), Some(favorites.id)).await,
        Err(Error::AccessDenied(_))
    ));
    assert_eq!(count(&pool, "playlist_items").await, 0);

    let item = playlists::add_item(&pool, &user, Some(song.id), Some(favorites.id))
        .await
        .unwrap()
        .unwrap();

    assert!(matches!(
        playlists::remove_item(&pool, &admin, item.id).await,
        Err(Error::AccessDenied(_))
    ));
    assert_eq!(count(&pool, "playlist_items").await, 1);
}

#[tokio::test]
async fn test_remove_item_returns_parent_playlist() {
    let (pool, _dir) = seeded_db().await;
    let admin = boss(&pool).await;
    let user = student(&pool).await;

    let song = catalog::add_song(&pool, &admin, Some("Imagine"), Some("Lennon")).await.unwrap().unwrap();
    let favorites = playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap().unwrap();
    let item = playlists::add_item(&pool, &user, Some(song.id), Some(favorites.id))
        .await
        .unwrap()
        .unwrap();

    let parent = playlists::remove_item(&pool, &user, item.id).await.unwrap();
    assert_eq!(parent, favorites.id);
    assert_eq!(count(&pool, "playlist_items").await, 0);

    assert!(matches!(
        playlists::remove_item(&pool, &user, item.id).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_playlist_cascades() {
    let (pool, _dir) = seeded_db().await;
    let admin = boss(&pool).await;
    let user = student(&pool).await;

    let song = catalog::add_song(&pool, &admin, Some("Imagine"), Some("Lennon")).await.unwrap().unwrap();
    let favorites = playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap().unwrap();
    let workout = playlists::create_playlist(&pool, &user, Some("Workout")).await.unwrap().unwrap();
    playlists::add_item(&pool, &user, Some(song.id), Some(favorites.id)).await.unwrap();
    playlists::add_item(&pool, &user, Some(song.id), Some(workout.id)).await.unwrap();

    assert!(matches!(
        playlists::delete_playlist(&pool, &admin, favorites.id).await,
        Err(Error::AccessDenied(_))
    ));

    playlists::delete_playlist(&pool, &user, favorites.id).await.unwrap();

    let orphaned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_items WHERE playlist_id = ?")
        .bind(favorites.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphaned, 0);
    assert_eq!(count(&pool, "playlist_items").await, 1);
    assert!(matches!(
        playlists::delete_playlist(&pool, &user, favorites.id).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_catalog_and_playlist_scenario() {
    let (pool, _dir) = seeded_db().await;
    let admin = boss(&pool).await;
    let user = student(&pool).await;

    let before = catalog::count_songs(&pool).await.unwrap();
    let imagine = catalog::add_song(&pool, &admin, Some("Imagine"), Some("Lennon")).await.unwrap().unwrap();
    assert_eq!(catalog::count_songs(&pool).await.unwrap(), before + 1);

    let favorites = playlists::create_playlist(&pool, &user, Some("Favorites")).await.unwrap().unwrap();
    assert!(playlists::list_my_playlists(&pool, &user).await.unwrap().contains(&favorites));
    assert!(!playlists::list_my_playlists(&pool, &admin).await.unwrap().contains(&favorites));

    playlists::add_item(&pool, &user, Some(imagine.id), Some(favorites.id)).await.unwrap();
    let detail = playlists::view_playlist(&pool, &user, favorites.id).await.unwrap();
    assert_eq!(detail.entries.len(), 1);

    catalog::delete_song(&pool, &admin, imagine.id).await.unwrap();
    let detail = playlists::view_playlist(&pool, &user, favorites.id).await.unwrap();
    assert!(detail.entries.is_empty());
}
