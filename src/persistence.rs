//! Flat-file persistence gateway
//!
//! Three semicolon-delimited text files, each with a header row:
//!
//! - books:   `uuid;titulo;autor;genero;editorial;estado`
//! - members: `rut_formateado;nombre`
//! - loans:   `id_reserva;rut_usuario;uuid_libro`
//!
//! Loading is lenient: a missing file starts the store empty, malformed rows
//! are logged and skipped. Loans must be loaded after books and members so
//! their references resolve; a book found available while an active loan
//! references it is repaired to LOANED (the loans file wins).
//!
//! Saving is write-through from the facade: failures there are logged and
//! the in-memory state stays authoritative. The explicit user-requested
//! save propagates I/O errors instead.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    config::StorageConfig,
    error::AppResult,
    models::{
        book::{Book, BookStatus},
        identity::Rut,
        loan::{Loan, LOAN_DAYS},
        member::Member,
    },
    repository::{BookStore, LoanStore, MemberStore, Repository},
};

const SEPARATOR: &str = ";";

const BOOKS_HEADER: &str = "uuid;titulo;autor;genero;editorial;estado";
const MEMBERS_HEADER: &str = "rut_formateado;nombre";
const LOANS_HEADER: &str = "id_reserva;rut_usuario;uuid_libro";

/// Persistence gateway bound to the three configured file paths
#[derive(Debug, Clone)]
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Load all three stores in dependency order: books and members first,
    /// then loans.
    pub fn load_all(&self, repository: &mut Repository) {
        self.load_books(&mut repository.books);
        self.load_members(&mut repository.members);
        self.load_loans(
            &mut repository.loans,
            &repository.members,
            &mut repository.books,
        );
    }

    pub fn load_books(&self, books: &mut impl BookStore) {
        let Some(reader) = open_reader(&self.config.books_path) else {
            return;
        };

        let mut loaded = 0usize;
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!(path = %self.config.books_path, "read failed: {}", e);
                    return;
                }
            };
            if is_skippable(&line, "uuid") {
                continue;
            }

            let fields: Vec<&str> = line.split(SEPARATOR).collect();
            if fields.len() < 6 {
                tracing::warn!(row = %line, "book row has too few fields, skipped");
                continue;
            }

            let id = match fields[0].trim().parse::<Uuid>() {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(row = %line, "invalid book id, skipped: {}", e);
                    continue;
                }
            };
            let status = match fields[5].parse::<BookStatus>() {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!(row = %line, "invalid book status, skipped: {}", e);
                    continue;
                }
            };

            let book = Book::restore(
                id,
                fields[1].trim().to_string(),
                fields[2].trim().to_string(),
                fields[3].trim().to_string(),
                fields[4].trim().to_string(),
                status,
            );
            match books.add(book) {
                Ok(()) => loaded += 1,
                Err(e) => tracing::warn!(row = %line, "book row rejected, skipped: {}", e),
            }
        }
        tracing::info!(path = %self.config.books_path, loaded, "books loaded");
    }

    pub fn load_members(&self, members: &mut impl MemberStore) {
        let Some(reader) = open_reader(&self.config.members_path) else {
            return;
        };

        let mut loaded = 0usize;
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!(path = %self.config.members_path, "read failed: {}", e);
                    return;
                }
            };
            if is_skippable(&line, "rut") {
                continue;
            }

            let fields: Vec<&str> = line.split(SEPARATOR).collect();
            if fields.len() < 2 {
                tracing::warn!(row = %line, "member row has too few fields, skipped");
                continue;
            }

            let identity = match Rut::parse(fields[0]) {
                Ok(identity) => identity,
                Err(e) => {
                    tracing::warn!(row = %line, "invalid identity, skipped: {}", e);
                    continue;
                }
            };

            // first row wins; later duplicates are dropped
            if members.find_by_identity(&identity).is_some() {
                tracing::warn!(identity = %identity, "duplicate identity, row skipped");
                continue;
            }

            members.add(Member::new(fields[1].trim().to_string(), identity));
            loaded += 1;
        }
        tracing::info!(path = %self.config.members_path, loaded, "members loaded");
    }

    /// Must run after [`Storage::load_books`] and [`Storage::load_members`]:
    /// every row resolves a member and a book loaded before it.
    pub fn load_loans(
        &self,
        loans: &mut impl LoanStore,
        members: &impl MemberStore,
        books: &mut impl BookStore,
    ) {
        let Some(reader) = open_reader(&self.config.loans_path) else {
            return;
        };

        // the file carries no due date; fall back to the standard offset
        let default_due = Utc::now() + Duration::days(LOAN_DAYS);

        let mut loaded = 0usize;
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!(path = %self.config.loans_path, "read failed: {}", e);
                    return;
                }
            };
            if is_skippable(&line, "id_reserva") {
                continue;
            }

            let fields: Vec<&str> = line.split(SEPARATOR).collect();
            if fields.len() < 3 {
                tracing::warn!(row = %line, "loan row has too few fields, skipped");
                continue;
            }

            let id = match fields[0].trim().parse::<i32>() {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!(row = %line, "invalid loan id, skipped: {}", e);
                    continue;
                }
            };
            let identity = match Rut::parse(fields[1]) {
                Ok(identity) => identity,
                Err(e) => {
                    tracing::warn!(row = %line, "invalid identity, skipped: {}", e);
                    continue;
                }
            };
            let book_id = match fields[2].trim().parse::<Uuid>() {
                Ok(book_id) => book_id,
                Err(e) => {
                    tracing::warn!(row = %line, "invalid book id, skipped: {}", e);
                    continue;
                }
            };

            if members.find_by_identity(&identity).is_none() {
                tracing::warn!(loan_id = id, identity = %identity, "member not found, loan skipped");
                continue;
            }
            let Some(book) = books.find_by_id(&book_id) else {
                tracing::warn!(loan_id = id, book = %book_id, "book not found, loan skipped");
                continue;
            };

            // the loans file is the source of truth for active loans: a book
            // listed available here is repaired to LOANED
            if !book.is_loaned() {
                tracing::info!(loan_id = id, book = %book_id, "book marked LOANED by active loan");
                books.set_status(&book_id, BookStatus::Loaned);
            }

            let loan = Loan {
                id,
                member: identity,
                book: book_id,
                due: default_due,
            };
            match loans.add(loan) {
                Ok(()) => loaded += 1,
                Err(e) => tracing::warn!(row = %line, "loan row rejected, skipped: {}", e),
            }
        }
        tracing::info!(path = %self.config.loans_path, loaded, "loans loaded");
    }

    /// Save all three stores; the first I/O failure is propagated
    pub fn save_all(&self, repository: &Repository) -> AppResult<()> {
        self.write_books(&repository.books.list_all())?;
        self.write_members(&repository.members.list_all())?;
        self.write_loans(&repository.loans.list_all())?;
        Ok(())
    }

    /// Write-through save of the catalog; failure is logged, never raised
    pub fn save_books(&self, books: &[Book]) {
        if let Err(e) = self.write_books(books) {
            tracing::error!(path = %self.config.books_path, "book save failed: {}", e);
        }
    }

    /// Write-through save of the members; failure is logged, never raised
    pub fn save_members(&self, members: &[Member]) {
        if let Err(e) = self.write_members(members) {
            tracing::error!(path = %self.config.members_path, "member save failed: {}", e);
        }
    }

    /// Write-through save of the loans; failure is logged, never raised
    pub fn save_loans(&self, loans: &[Loan]) {
        if let Err(e) = self.write_loans(loans) {
            tracing::error!(path = %self.config.loans_path, "loan save failed: {}", e);
        }
    }

    fn write_books(&self, books: &[Book]) -> AppResult<()> {
        let mut writer = open_writer(&self.config.books_path)?;
        writeln!(writer, "{}", BOOKS_HEADER)?;
        for book in books {
            writeln!(
                writer,
                "{};{};{};{};{};{}",
                book.id, book.title, book.author, book.genre, book.publisher, book.status
            )?;
        }
        writer.flush()?;
        tracing::debug!(path = %self.config.books_path, count = books.len(), "books saved");
        Ok(())
    }

    fn write_members(&self, members: &[Member]) -> AppResult<()> {
        let mut writer = open_writer(&self.config.members_path)?;
        writeln!(writer, "{}", MEMBERS_HEADER)?;
        for member in members {
            writeln!(writer, "{};{}", member.identity.formatted(), member.name)?;
        }
        writer.flush()?;
        tracing::debug!(path = %self.config.members_path, count = members.len(), "members saved");
        Ok(())
    }

    fn write_loans(&self, loans: &[Loan]) -> AppResult<()> {
        let mut writer = open_writer(&self.config.loans_path)?;
        writeln!(writer, "{}", LOANS_HEADER)?;
        for loan in loans {
            writeln!(
                writer,
                "{};{};{}",
                loan.id,
                loan.member.formatted(),
                loan.book
            )?;
        }
        writer.flush()?;
        tracing::debug!(path = %self.config.loans_path, count = loans.len(), "loans saved");
        Ok(())
    }
}

/// Open a store file for reading; `None` (with a log entry) when it does
/// not exist yet.
fn open_reader(path: &str) -> Option<BufReader<File>> {
    if !Path::new(path).exists() {
        tracing::info!(path, "store file not found, starting empty");
        return None;
    }
    match File::open(path) {
        Ok(file) => Some(BufReader::new(file)),
        Err(e) => {
            tracing::error!(path, "could not open store file: {}", e);
            None
        }
    }
}

fn open_writer(path: &str) -> std::io::Result<BufWriter<File>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Blank lines and the header row are not data
fn is_skippable(line: &str, header_prefix: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.to_lowercase().starts_with(header_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Repository;
    use std::fs;

    fn storage_in(dir: &Path) -> Storage {
        Storage::new(StorageConfig {
            books_path: dir.join("libros.csv").to_string_lossy().into_owned(),
            members_path: dir.join("usuarios.csv").to_string_lossy().into_owned(),
            loans_path: dir.join("reservas.csv").to_string_lossy().into_owned(),
        })
    }

    #[test]
    fn test_missing_files_start_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut repo = Repository::new();
        storage.load_all(&mut repo);
        assert!(repo.books.is_empty());
        assert!(repo.members.is_empty());
        assert!(repo.loans.is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        fs::write(
            dir.path().join("usuarios.csv"),
            "rut_formateado;nombre\n\
             20.274.916-K;Kevin Castillo\n\
             not-a-rut;Ghost\n\
             only-one-field\n\
             20.274.916-K;Duplicate Row\n",
        )
        .unwrap();

        let mut repo = Repository::new();
        storage.load_members(&mut repo.members);

        let all = repo.members.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Kevin Castillo");
    }

    #[test]
    fn test_load_repairs_book_status_from_loans() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());
        let book_id = Uuid::new_v4();

        fs::write(
            dir.path().join("libros.csv"),
            format!(
                "uuid;titulo;autor;genero;editorial;estado\n\
                 {};El Quijote;Cervantes;Novela;Alfaguara;AVAILABLE\n",
                book_id
            ),
        )
        .unwrap();
        fs::write(
            dir.path().join("usuarios.csv"),
            "rut_formateado;nombre\n20.274.916-K;Kevin Castillo\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("reservas.csv"),
            format!("id_reserva;rut_usuario;uuid_libro\n3;20.274.916-K;{}\n", book_id),
        )
        .unwrap();

        let mut repo = Repository::new();
        storage.load_all(&mut repo);

        assert_eq!(repo.loans.list_all().len(), 1);
        assert_eq!(
            repo.books.find_by_id(&book_id).unwrap().status,
            BookStatus::Loaned
        );
    }

    #[test]
    fn test_unresolved_loan_references_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        fs::write(
            dir.path().join("reservas.csv"),
            format!(
                "id_reserva;rut_usuario;uuid_libro\n1;20.274.916-K;{}\n",
                Uuid::new_v4()
            ),
        )
        .unwrap();

        let mut repo = Repository::new();
        storage.load_all(&mut repo);
        assert!(repo.loans.is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_fields_and_ids() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(dir.path());

        let mut repo = Repository::new();
        let book = Book::new(
            "El Quijote".into(),
            "Cervantes".into(),
            "Novela".into(),
            "Alfaguara".into(),
        );
        let book_id = book.id;
        repo.books.add(book).unwrap();
        repo.members.add(Member::new(
            "Kevin Castillo".into(),
            Rut::parse("20274916K").unwrap(),
        ));

        storage.save_all(&repo).unwrap();

        let mut reloaded = Repository::new();
        storage.load_all(&mut reloaded);

        let book = reloaded.books.find_by_id(&book_id).expect("id preserved");
        assert_eq!(book.title, "El Quijote");
        assert_eq!(book.author, "Cervantes");
        assert_eq!(book.genre, "Novela");
        assert_eq!(book.publisher, "Alfaguara");
        assert_eq!(book.status, BookStatus::Available);

        let members = reloaded.members.list_all();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Kevin Castillo");
        assert_eq!(members[0].identity.formatted(), "20.274.916-K");
    }

    #[test]
    fn test_save_all_propagates_io_failure() {
        let storage = Storage::new(StorageConfig {
            books_path: "/dev/null/impossible/libros.csv".into(),
            members_path: "/dev/null/impossible/usuarios.csv".into(),
            loans_path: "/dev/null/impossible/reservas.csv".into(),
        });
        let repo = Repository::new();
        assert!(storage.save_all(&repo).is_err());
    }
}
