//! Built-in fallback catalog
//!
//! Shown when the remote store is unconfigured or unreachable, and used as
//! the seed payload when the remote collection is empty. Sample records
//! carry fixed `sample-*` sentinel identifiers and the local flag; they are
//! never updated remotely.

use crate::models::{Book, Category, SAMPLE_ID_PREFIX};

/// The static fallback sample set, in fixed display order.
pub fn builtin() -> Vec<Book> {
    vec![
        sample(
            "static-hosting",
            "Publishing a Site with GitHub Pages",
            "Deploying a front-end project to GitHub Pages and wiring up a custom domain.",
            Category::DevOps,
            STATIC_HOSTING_CONTENT,
        ),
        sample(
            "python-basics",
            "Python Fundamentals",
            "Core Python concepts: variables, collections, and control flow for new developers.",
            Category::Programming,
            PYTHON_BASICS_CONTENT,
        ),
        sample(
            "design-handoff",
            "Design Handoff that Developers Like",
            "Structuring mockups, tokens, and redlines so the build matches the design.",
            Category::UiUx,
            DESIGN_HANDOFF_CONTENT,
        ),
    ]
}

fn sample(
    slug: &str,
    title: &str,
    description: &str,
    category: Category,
    content: &str,
) -> Book {
    Book {
        id: format!("{SAMPLE_ID_PREFIX}{slug}"),
        title: title.to_string(),
        description: description.to_string(),
        category,
        content: content.to_string(),
        is_hidden: false,
        is_local: true,
        created_at: None,
    }
}

const STATIC_HOSTING_CONTENT: &str = r#"# Deploying to GitHub Pages

GitHub Pages hosts static sites straight from a repository.

## Steps

1. Make sure the project has an `index.html` at the root.
2. Open the repository **Settings** tab.
3. Pick **Pages** in the sidebar.
4. Select the `main` branch and the `/(root)` folder, then save.

## Custom domains

To serve the site from your own domain:

- Add a `CNAME` file at the repository root containing the domain name.
- Point an **A record** at the GitHub Pages addresses in your DNS panel.

```text
www.example.dev -> 185.199.108.153
```

> Always enable HTTPS enforcement once the certificate is issued.
"#;

const PYTHON_BASICS_CONTENT: &str = r#"# Python Fundamentals

Python is a high-level language that prioritizes readable code.

## Why Python?

- Syntax close to plain English.
- A very large library ecosystem.
- Widely used in data science and backend development.

## A first function

```python
def average(grades):
    return sum(grades) / len(grades)

scores = [80, 90, 75, 85, 95]
print(f"average: {average(scores)}")
```

## Collection types

1. **List**: `[1, 2, 3]` (mutable)
2. **Tuple**: `(1, 2, 3)` (fixed)
3. **Dictionary**: `{"name": "Andi"}` (key/value)

> Programming is not about what you know; it is about what you can figure out.
"#;

const DESIGN_HANDOFF_CONTENT: &str = r#"# Design Handoff that Developers Like

A handoff is complete when a developer can build the screen without asking
what a spacing value is.

## Checklist

- Name layers after the component they become.
- Export color and type decisions as tokens, not screenshots.
- Annotate empty, loading, and error states, not only the happy path.

## Redlines

Keep redlines in one place per screen:

```text
card padding: 24px
title: 20px / 28px, semibold
body:  14px / 22px
```

A short walkthrough recording beats a long written brief.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_samples_are_local() {
        let samples = builtin();
        assert_eq!(samples.len(), 3);
        for book in &samples {
            assert!(book.is_local);
            assert!(book.id.starts_with(SAMPLE_ID_PREFIX));
            assert!(!book.is_hidden);
            assert!(book.created_at.is_none());
            assert!(!book.title.trim().is_empty());
            assert!(!book.content.trim().is_empty());
        }
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let samples = builtin();
        for (i, a) in samples.iter().enumerate() {
            for b in &samples[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }
}
