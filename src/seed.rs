use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set};

use crate::models::{book, book_genres, genre};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Idempotent: skip when the catalog already has genres
    if genre::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let genre_titles = ["Science Fiction", "Fantasy", "Horror", "Biography"];
    let mut genre_ids = Vec::new();
    for title in genre_titles {
        let model = genre::ActiveModel {
            title: Set(title.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        genre_ids.push(model.id);
    }

    let books = [
        ("Dune", "Frank Herbert", "1965-08-01", vec![0]),
        ("The Hobbit", "J.R.R. Tolkien", "1937-09-21", vec![1]),
        ("I, Robot", "Isaac Asimov", "1950-12-02", vec![0]),
    ];

    for (title, author, published_at, genre_indexes) in books {
        let model = book::ActiveModel {
            title: Set(title.to_owned()),
            author: Set(author.to_owned()),
            published_at: Set(published_at.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for index in genre_indexes {
            let link = book_genres::ActiveModel {
                book_id: Set(model.id),
                genre_id: Set(genre_ids[index]),
            };
            book_genres::Entity::insert(link)
                .exec_without_returning(db)
                .await?;
        }
    }

    Ok(())
}
