//! End-to-end tests driving the library facade over real store files

use std::fs;

use biblioterm::config::StorageConfig;
use biblioterm::error::AppError;
use biblioterm::persistence::Storage;
use biblioterm::services::Library;

fn storage_in(dir: &std::path::Path) -> Storage {
    Storage::new(StorageConfig {
        books_path: dir.join("libros.csv").to_string_lossy().into_owned(),
        members_path: dir.join("usuarios.csv").to_string_lossy().into_owned(),
        loans_path: dir.join("reservas.csv").to_string_lossy().into_owned(),
    })
}

#[test]
fn lending_cycle_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let mut library = Library::new(storage_in(dir.path()));
    library.load();

    library
        .register_member("kevin castillo", "20.274.916-K")
        .unwrap();
    let book = library
        .add_book("el quijote", "cervantes", "novela", "alfaguara")
        .unwrap();
    let loan = library.create_loan(&book.id, "20274916K").unwrap();
    assert_eq!(loan.id, 1);

    // restart: a fresh process over the same files
    let mut library = Library::new(storage_in(dir.path()));
    library.load();

    let books = library.list_books();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, book.id);
    assert!(books[0].is_loaned());

    let loans = library.list_active_loans().unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].id, 1);
    assert_eq!(loans[0].book_title, "El Quijote");
    assert_eq!(loans[0].member_name, "Kevin Castillo");

    // the loaned book cannot be loaned again after the restart
    let err = library.create_loan(&book.id, "20274916K").unwrap_err();
    assert!(matches!(err, AppError::BookAlreadyLoaned(_)));

    // returning it flips the persisted status back
    library.return_loan(1).unwrap();
    let saved = fs::read_to_string(dir.path().join("libros.csv")).unwrap();
    assert!(saved.contains("AVAILABLE"));
    assert!(!saved.contains("LOANED"));
}

#[test]
fn duplicate_member_is_rejected_and_not_saved_twice() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = Library::new(storage_in(dir.path()));

    library
        .register_member("Kevin Castillo", "20274916K")
        .unwrap();
    let err = library
        .register_member("KEVIN CASTILLO", "20.274.916-K")
        .unwrap_err();
    assert!(matches!(err, AppError::MemberAlreadyRegistered(_)));

    let saved = fs::read_to_string(dir.path().join("usuarios.csv")).unwrap();
    let data_rows: Vec<&str> = saved
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with("rut"))
        .collect();
    assert_eq!(data_rows, vec!["20.274.916-K;Kevin Castillo"]);
}

#[test]
fn saved_files_carry_headers_and_formats() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = Library::new(storage_in(dir.path()));

    library
        .register_member("Kevin Castillo", "20274916K")
        .unwrap();
    let book = library
        .add_book("El Quijote", "Cervantes", "Novela", "Alfaguara")
        .unwrap();
    library.create_loan(&book.id, "20274916K").unwrap();

    let books = fs::read_to_string(dir.path().join("libros.csv")).unwrap();
    assert!(books.starts_with("uuid;titulo;autor;genero;editorial;estado\n"));
    assert!(books.contains(&format!(
        "{};El Quijote;Cervantes;Novela;Alfaguara;LOANED",
        book.id
    )));

    let members = fs::read_to_string(dir.path().join("usuarios.csv")).unwrap();
    assert!(members.starts_with("rut_formateado;nombre\n"));

    let loans = fs::read_to_string(dir.path().join("reservas.csv")).unwrap();
    assert!(loans.starts_with("id_reserva;rut_usuario;uuid_libro\n"));
    assert!(loans.contains(&format!("1;20.274.916-K;{}", book.id)));
}
