use criterion::{Criterion, black_box, criterion_group, criterion_main};

use typewell::generator::{PassageSource, TextSource};
use typewell::session::input::{Key, TypingState};
use typewell::session::text::TargetText;

use rand::SeedableRng;
use rand::rngs::SmallRng;

fn make_text(words: usize) -> TargetText {
    let mut source = PassageSource::new(SmallRng::seed_from_u64(7));
    TargetText::parse(&source.next_text(words)).unwrap()
}

/// Keys that type the text with a typo and correction roughly every tenth letter.
fn make_keys(text: &TargetText) -> Vec<Key> {
    let mut keys = Vec::new();
    let mut typed = 0usize;
    for word in text.words() {
        for &ch in word {
            if typed % 10 == 9 {
                keys.push(Key::Char('#'));
                keys.push(Key::Backspace);
            }
            keys.push(Key::Char(ch));
            typed += 1;
        }
        keys.push(Key::Space);
    }
    keys
}

fn make_word_keys(text: &TargetText) -> Vec<Key> {
    let mut keys = Vec::new();
    for word in text.words() {
        keys.extend(word.iter().map(|&ch| Key::Char(ch)));
        keys.push(Key::Space);
    }
    keys
}

fn bench_letters(c: &mut Criterion) {
    let text = make_text(200);
    let keys = make_keys(&text);

    c.bench_function("handle_key letters with corrections (200 words)", |b| {
        b.iter(|| {
            let mut state = TypingState::new(text.clone());
            for &key in &keys {
                black_box(state.handle_key(key, false));
            }
            assert!(state.is_complete());
        })
    });
}

fn bench_full_pass(c: &mut Criterion) {
    let text = make_text(200);
    let keys = make_word_keys(&text);

    c.bench_function("handle_key full pass (200 words)", |b| {
        b.iter(|| {
            let mut state = TypingState::new(text.clone());
            for &key in &keys {
                black_box(state.handle_key(key, true));
            }
            assert!(state.is_complete());
        })
    });
}

criterion_group!(benches, bench_letters, bench_full_pass);
criterion_main!(benches);
