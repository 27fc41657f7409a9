//! Terminal menu loop
//!
//! Presentation collaborator: owns all prompting and console formatting and
//! consumes the [`Library`] facade. Domain failures are rendered with their
//! error code and the loop continues.

use std::io::{self, BufRead, Write};

use uuid::Uuid;

use crate::{error::AppError, services::Library};

const MENU: &str = "\n=== Biblioterm ===\n\
    1. Register member\n\
    2. Add book\n\
    3. Search books\n\
    4. Loan book\n\
    5. Return loan\n\
    6. List books\n\
    7. List members\n\
    8. List active loans\n\
    9. Save everything\n\
    0. Exit";

/// Run the interactive menu until the user exits
pub fn run(library: &mut Library) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("{}", MENU);
        let choice = prompt(&mut input, "Option: ")?;

        match choice.trim() {
            "1" => {
                let name = prompt(&mut input, "Name: ")?;
                let identity = prompt(&mut input, "RUT: ")?;
                report(library.register_member(&name, &identity).map(|member| {
                    format!("Registered {} ({})", member.name, member.identity)
                }));
            }
            "2" => {
                let title = prompt(&mut input, "Title: ")?;
                let author = prompt(&mut input, "Author: ")?;
                let genre = prompt(&mut input, "Genre: ")?;
                let publisher = prompt(&mut input, "Publisher: ")?;
                report(
                    library
                        .add_book(&title, &author, &genre, &publisher)
                        .map(|book| format!("Added '{}' with id {}", book.title, book.id)),
                );
            }
            "3" => {
                let criterion = prompt(&mut input, "Search: ")?;
                match library.search_books(&criterion) {
                    Ok(books) if books.is_empty() => println!("No matches."),
                    Ok(books) => {
                        for book in books {
                            println!(
                                "{} | {} | {} | {} | {}",
                                book.id, book.title, book.author, book.publisher, book.status
                            );
                        }
                    }
                    Err(e) => print_error(&e),
                }
            }
            "4" => {
                let raw_id = prompt(&mut input, "Book id: ")?;
                let identity = prompt(&mut input, "Member RUT: ")?;
                match raw_id.trim().parse::<Uuid>() {
                    Ok(book_id) => report(library.create_loan(&book_id, &identity).map(|loan| {
                        format!("Loan {} created, due {}", loan.id, loan.due.format("%Y-%m-%d"))
                    })),
                    Err(_) => println!("Not a valid book id."),
                }
            }
            "5" => {
                let raw_id = prompt(&mut input, "Loan id: ")?;
                match raw_id.trim().parse::<i32>() {
                    Ok(loan_id) => report(
                        library
                            .return_loan(loan_id)
                            .map(|book| format!("'{}' is available again", book.title)),
                    ),
                    Err(_) => println!("Not a valid loan id."),
                }
            }
            "6" => {
                for book in library.list_books() {
                    println!(
                        "{} | {} | {} | {} | {} | {}",
                        book.id, book.title, book.author, book.genre, book.publisher, book.status
                    );
                }
            }
            "7" => {
                for member in library.list_members() {
                    println!("{} | {}", member.identity, member.name);
                }
            }
            "8" => match library.list_active_loans() {
                Ok(loans) => {
                    for loan in loans {
                        println!(
                            "{} | {} ({}) | {} | due {}",
                            loan.id,
                            loan.member_name,
                            loan.member_identity,
                            loan.book_title,
                            loan.due.format("%Y-%m-%d")
                        );
                    }
                }
                Err(e) => print_error(&e),
            },
            "9" => report(library.save_all().map(|()| "Saved.".to_string())),
            "0" => break,
            _ => println!("Unknown option."),
        }
    }

    Ok(())
}

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn report(result: Result<String, AppError>) {
    match result {
        Ok(message) => println!("{}", message),
        Err(e) => print_error(&e),
    }
}

fn print_error(error: &AppError) {
    println!("[error {}] {}", error.code() as u32, error);
}
