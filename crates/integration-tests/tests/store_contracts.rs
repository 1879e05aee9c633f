//! Port-contract checks shared by every `BoardRepo` backend.

use integration_tests::sample_board;
use pb_core::models::BoardState;
use pb_core::traits::BoardRepo;
use pb_db_sqlite::SqliteBoardRepo;
use pb_store_file::FileBoardRepo;

async fn check_contract(repo: &dyn BoardRepo) {
    // nothing saved yet
    assert!(repo.load().await.unwrap().is_none());

    // roundtrip
    let board = sample_board();
    repo.save(&board).await.expect("save failed");
    assert_eq!(repo.load().await.unwrap().unwrap(), board);

    // whole-document overwrite, including back to empty
    let empty = BoardState::default();
    repo.save(&empty).await.expect("save failed");
    assert_eq!(repo.load().await.unwrap().unwrap(), empty);
}

#[tokio::test]
async fn sqlite_backend_honors_the_contract() {
    let repo = SqliteBoardRepo::new("sqlite::memory:").await.unwrap();
    check_contract(&repo).await;
}

#[tokio::test]
async fn file_backend_honors_the_contract() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileBoardRepo::new(dir.path().join("board.json"));
    check_contract(&repo).await;
}
