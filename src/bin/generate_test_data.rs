#[cfg(feature = "development")]
use wrestling_brackets::db::{raw_diesel_cxn_from_env, run_migrations};
#[cfg(feature = "development")]
use wrestling_brackets::models::{
    matches::{Match, NewMatch},
    participant_matches::NewParticipantMatch,
    participants::{NewParticipant, Participant},
    people::NewPerson,
    roles::NewRole,
    schools::NewSchool,
    tournaments::{NewTournament, Tournament},
};
#[cfg(feature = "development")]
use wrestling_brackets::utils::format_secs;

#[cfg(feature = "development")]
const DEMO_NAME: &str = "Demo Open";

// Seeds an 8 man bracket: quarters wrestled, one semi wrestled, one semi on the mat
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(feature = "development")]
    {
        create_the_bracket()?;
    }
    Ok(())
}

#[cfg(feature = "development")]
fn create_the_bracket() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let mut db = raw_diesel_cxn_from_env()?;
    run_migrations(&mut db)?;

    if Tournament::all(&mut db)?
        .iter()
        .any(|t| t.name.as_deref() == Some(DEMO_NAME))
    {
        println!("Test data already generated");
        return Ok(());
    }

    let t = NewTournament::new(DEMO_NAME, Some(2024)).save(&mut db)?;
    let schools = ["Iowa", "Penn State", "Cornell", "Oklahoma State"]
        .into_iter()
        .map(|name| NewSchool::new(name).save(&mut db))
        .collect::<Result<Vec<_>, _>>()?;
    let names = [
        ("Spencer", "Lee"),
        ("Vito", "Arujau"),
        ("Daton", "Fix"),
        ("Roman", "Bravo-Young"),
        ("Nick", "Suriano"),
        ("Austin", "DeSanto"),
        ("Pat", "Glory"),
        ("Matt", "Ramos"),
    ];
    let mut seeded: Vec<Participant> = Vec::with_capacity(names.len());
    for (i, (first, last)) in names.into_iter().enumerate() {
        let person = NewPerson::new(first, last).save(&mut db)?;
        let role = NewRole::wrestler(&person).save(&mut db)?;
        let school = &schools[i % schools.len()];
        let seed = Some(i as i32 + 1);
        let p = NewParticipant::new(&role, Some(school), Some(2024), Some("125"), seed)
            .save(&mut db)?;
        seeded.push(p);
    }
    let seed = |n: usize| &seeded[n - 1];

    let the_final = NewMatch::new(&t, "Finals", 3, 1).save(&mut db)?;
    let semis = (1..=2)
        .map(|i| NewMatch::new(&t, "Semifinals", 2, i).save(&mut db))
        .collect::<Result<Vec<Match>, _>>()?;
    let quarters = (1..=4)
        .map(|i| NewMatch::new(&t, "Quarterfinals", 1, i).save(&mut db))
        .collect::<Result<Vec<Match>, _>>()?;

    // (match, winner seed, loser seed, winner score, loser score, result type, fall secs)
    let wrestled = [
        (&quarters[0], 1, 8, 6, 0, "FALL", Some(107)),
        (&quarters[1], 4, 5, 5, 3, "DEC", None),
        (&quarters[2], 2, 7, 18, 3, "TF", Some(295)),
        (&quarters[3], 3, 6, 12, 2, "MD", None),
        (&semis[0], 1, 4, 4, 2, "SV-1", None),
    ];
    for (m, w, l, ws, ls, rt, fall) in wrestled {
        let next = if m.round_order == Some(1) {
            &semis[(m.bracket_order.unwrap_or(1) as usize - 1) / 2]
        } else {
            &the_final
        };
        let mut winner = NewParticipantMatch::new(m, seed(w))
            .won(Some(ws), Some(rt))
            .advancing_to(next);
        let mut loser = NewParticipantMatch::new(m, seed(l))
            .lost(Some(ls), Some(rt))
            .advancing_to(next);
        if let Some(secs) = fall {
            winner = winner.fall_time(format_secs(secs));
            loser = loser.fall_time(format_secs(secs));
        }
        winner.save(&mut db)?;
        loser.save(&mut db)?;
    }

    // the other semi is on the mat, and the 1 seed is waiting in the final
    for s in [2, 3] {
        NewParticipantMatch::new(&semis[1], seed(s))
            .advancing_to(&the_final)
            .save(&mut db)?;
    }
    NewParticipantMatch::new(&the_final, seed(1)).save(&mut db)?;

    println!("Created tournament {} ({})", DEMO_NAME, t.tournament_id);
    Ok(())
}
