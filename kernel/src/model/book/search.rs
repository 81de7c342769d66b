use unicode_normalization::UnicodeNormalization;

use super::Book;

// NFD 分解後に取り除く結合文字（アクセント記号など）の範囲
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// 大文字小文字とアクセント記号を無視して比較できる形にする
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect::<String>()
        .to_lowercase()
}

impl Book {
    fn searchable_fields(&self) -> [String; 8] {
        [
            self.code.to_string(),
            normalize(&self.title),
            normalize(&self.author),
            normalize(&self.genre),
            normalize(&self.editor),
            normalize(&self.location),
            normalize(&self.reference),
            self.currently_with
                .map(|holder| normalize(&holder.to_string()))
                .unwrap_or_default(),
        ]
    }

    pub fn matches(&self, normalized_query: &str) -> bool {
        self.searchable_fields()
            .iter()
            .any(|field| field.contains(normalized_query))
    }
}

/// 空のクエリはすべての本に一致する
pub fn filter_books(books: Vec<Book>, query: &str) -> Vec<Book> {
    let query = normalize(query);
    if query.is_empty() {
        return books;
    }
    books.into_iter().filter(|b| b.matches(&query)).collect()
}
