//! Canned fixtures, squads and statistics. Dates are relative to "today" so
//! the listings always look current.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::{
    FootballDataProvider, LeagueStatsDto, MatchDto, MatchOddsDto, Player, PlayerSearchResponse,
    PlayerStatsDto, ProviderError, TeamDto, TeamInfo, TeamStatsDto, TopScorer, UpcomingWindow,
};
use crate::domain::money::from_cents;

const LOGO_BASE: &str = "https://media.api-sports.io/football";

/// `(name, region, api-sports league id)`
pub const LEAGUES: &[(&str, &str, u32)] = &[
    ("Premier League", "England", 39),
    ("La Liga", "Spain", 140),
    ("Champions League", "Europe", 2),
    ("Serie A", "Italy", 135),
    ("Bundesliga", "Germany", 78),
];

/// `(name, api-sports team id, domestic league)`
const TEAMS: &[(&str, u32, &str)] = &[
    ("Manchester City", 50, "Premier League"),
    ("Arsenal", 42, "Premier League"),
    ("Liverpool", 40, "Premier League"),
    ("Manchester United", 33, "Premier League"),
    ("Chelsea", 49, "Premier League"),
    ("Tottenham", 47, "Premier League"),
    ("Newcastle", 34, "Premier League"),
    ("Aston Villa", 66, "Premier League"),
    ("Real Madrid", 541, "La Liga"),
    ("Barcelona", 529, "La Liga"),
    ("Atletico Madrid", 530, "La Liga"),
    ("Sevilla", 536, "La Liga"),
    ("Valencia", 532, "La Liga"),
    ("Real Betis", 543, "La Liga"),
    ("Bayern Munich", 157, "Bundesliga"),
    ("PSG", 85, "Ligue 1"),
    ("Inter", 505, "Serie A"),
    ("AC Milan", 489, "Serie A"),
    ("Juventus", 496, "Serie A"),
    ("Napoli", 492, "Serie A"),
    ("Borussia Dortmund", 165, "Bundesliga"),
    ("RB Leipzig", 173, "Bundesliga"),
    ("Bayer Leverkusen", 168, "Bundesliga"),
];

pub struct FixtureSide {
    pub id: &'static str,
    pub name: &'static str,
    pub score: Option<i32>,
}

/// One scheduled or running match. Odds are in hundredths.
pub struct Fixture {
    pub id: &'static str,
    pub tournament: &'static str,
    pub day_offset: i64,
    pub time: &'static str,
    pub home: FixtureSide,
    pub away: FixtureSide,
    pub odds: (i64, i64, i64),
    pub minute: Option<i32>,
}

const fn side(id: &'static str, name: &'static str, score: Option<i32>) -> FixtureSide {
    FixtureSide { id, name, score }
}

pub const FIXTURES: &[Fixture] = &[
    Fixture {
        id: "1",
        tournament: "Premier League",
        day_offset: 0,
        time: "15:00",
        home: side("1", "Manchester City", Some(2)),
        away: side("2", "Arsenal", Some(1)),
        odds: (185, 340, 450),
        minute: Some(67),
    },
    Fixture {
        id: "2",
        tournament: "Premier League",
        day_offset: 0,
        time: "17:30",
        home: side("3", "Liverpool", None),
        away: side("4", "Manchester United", None),
        odds: (175, 360, 480),
        minute: None,
    },
    Fixture {
        id: "3",
        tournament: "Premier League",
        day_offset: 1,
        time: "20:00",
        home: side("5", "Chelsea", None),
        away: side("6", "Tottenham", None),
        odds: (210, 330, 350),
        minute: None,
    },
    Fixture {
        id: "4",
        tournament: "Premier League",
        day_offset: 2,
        time: "20:45",
        home: side("7", "Newcastle", None),
        away: side("8", "Aston Villa", None),
        odds: (195, 340, 400),
        minute: None,
    },
    Fixture {
        id: "5",
        tournament: "La Liga",
        day_offset: 0,
        time: "21:00",
        home: side("9", "Real Madrid", Some(0)),
        away: side("10", "Barcelona", Some(0)),
        odds: (210, 325, 360),
        minute: Some(23),
    },
    Fixture {
        id: "6",
        tournament: "La Liga",
        day_offset: 1,
        time: "19:00",
        home: side("11", "Atletico Madrid", None),
        away: side("12", "Sevilla", None),
        odds: (190, 330, 420),
        minute: None,
    },
    Fixture {
        id: "7",
        tournament: "La Liga",
        day_offset: 3,
        time: "20:00",
        home: side("13", "Valencia", None),
        away: side("14", "Real Betis", None),
        odds: (230, 320, 310),
        minute: None,
    },
    Fixture {
        id: "8",
        tournament: "Champions League",
        day_offset: 7,
        time: "20:00",
        home: side("1", "Manchester City", None),
        away: side("9", "Real Madrid", None),
        odds: (190, 350, 410),
        minute: None,
    },
    Fixture {
        id: "9",
        tournament: "Champions League",
        day_offset: 7,
        time: "20:00",
        home: side("15", "Bayern Munich", None),
        away: side("16", "PSG", None),
        odds: (195, 350, 390),
        minute: None,
    },
    Fixture {
        id: "10",
        tournament: "Champions League",
        day_offset: 8,
        time: "20:00",
        home: side("3", "Liverpool", None),
        away: side("10", "Barcelona", None),
        odds: (205, 340, 360),
        minute: None,
    },
    Fixture {
        id: "11",
        tournament: "Serie A",
        day_offset: 1,
        time: "20:45",
        home: side("17", "Inter", None),
        away: side("18", "AC Milan", None),
        odds: (215, 330, 340),
        minute: None,
    },
    Fixture {
        id: "12",
        tournament: "Serie A",
        day_offset: 2,
        time: "18:00",
        home: side("19", "Juventus", None),
        away: side("20", "Napoli", None),
        odds: (200, 325, 380),
        minute: None,
    },
    Fixture {
        id: "13",
        tournament: "Bundesliga",
        day_offset: 2,
        time: "15:30",
        home: side("15", "Bayern Munich", None),
        away: side("21", "Borussia Dortmund", None),
        odds: (175, 380, 450),
        minute: None,
    },
    Fixture {
        id: "14",
        tournament: "Bundesliga",
        day_offset: 2,
        time: "17:30",
        home: side("22", "RB Leipzig", None),
        away: side("23", "Bayer Leverkusen", None),
        odds: (220, 340, 320),
        minute: None,
    },
];

pub fn league_logo(name: &str) -> String {
    let id = match name {
        "Ligue 1" => 61,
        other => LEAGUES
            .iter()
            .find(|(league, _, _)| *league == other)
            .map(|(_, _, id)| *id)
            .unwrap_or(1),
    };
    format!("{}/leagues/{}.png", LOGO_BASE, id)
}

pub fn team_logo(name: &str) -> String {
    let id = TEAMS
        .iter()
        .find(|(team, _, _)| *team == name)
        .map(|(_, id, _)| *id)
        .unwrap_or(1);
    format!("{}/teams/{}.png", LOGO_BASE, id)
}

fn region_of(tournament: &str) -> &'static str {
    LEAGUES
        .iter()
        .find(|(league, _, _)| *league == tournament)
        .map(|(_, region, _)| *region)
        .unwrap_or("World")
}

impl Fixture {
    pub fn date(&self, today: NaiveDate) -> NaiveDate {
        today + chrono::Duration::days(self.day_offset)
    }

    pub fn to_dto(&self, today: NaiveDate) -> MatchDto {
        let team = |s: &FixtureSide| TeamDto {
            id: s.id.to_string(),
            name: s.name.to_string(),
            logo: team_logo(s.name),
            score: s.score,
        };
        MatchDto {
            id: self.id.to_string(),
            tournament: self.tournament.to_string(),
            tournament_logo: league_logo(self.tournament),
            region: region_of(self.tournament).to_string(),
            date: self.date(today).format("%Y-%m-%d").to_string(),
            time: self.time.to_string(),
            team1: team(&self.home),
            team2: team(&self.away),
            minute: self.minute,
            odds: MatchOddsDto {
                team1_win: from_cents(self.odds.0),
                draw: from_cents(self.odds.1),
                team2_win: from_cents(self.odds.2),
            },
        }
    }
}

/// Serves the fixtures above. `today` is pinned at construction in tests
/// and follows the clock otherwise.
#[derive(Debug, Clone, Default)]
pub struct MockFootballData {
    today: Option<NaiveDate>,
}

impl MockFootballData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    fn players() -> Vec<Player> {
        let player = |id, name: &str, common: &str, position: &str, team: &str| Player {
            id,
            name: name.to_string(),
            common_name: Some(common.to_string()),
            position: Some(position.to_string()),
            nationality: None,
            current_team: Some(team.to_string()),
            age: None,
            image_url: None,
        };
        vec![
            player(1, "Erling Haaland", "Haaland", "Forward", "Manchester City"),
            player(2, "Jude Bellingham", "Bellingham", "Midfielder", "Real Madrid"),
            player(3, "Kylian Mbappé", "Mbappé", "Forward", "PSG"),
            player(4, "Mohamed Salah", "Salah", "Forward", "Liverpool"),
            player(5, "Kevin De Bruyne", "De Bruyne", "Midfielder", "Manchester City"),
            player(6, "Harry Kane", "Kane", "Forward", "Bayern Munich"),
        ]
    }
}

#[async_trait]
impl FootballDataProvider for MockFootballData {
    async fn search_players(&self, query: &str) -> Result<PlayerSearchResponse, ProviderError> {
        let needle = query.to_lowercase();
        let players = Self::players()
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p
                        .common_name
                        .as_deref()
                        .map_or(false, |c| c.to_lowercase().contains(&needle))
            })
            .collect();

        Ok(PlayerSearchResponse {
            success: true,
            players,
        })
    }

    async fn live_matches(&self) -> Result<Vec<MatchDto>, ProviderError> {
        let today = self.today();
        Ok(FIXTURES
            .iter()
            .filter(|f| f.minute.is_some() && f.date(today) == today)
            .map(|f| f.to_dto(today))
            .collect())
    }

    async fn upcoming_matches(&self, window: UpcomingWindow) -> Result<Vec<MatchDto>, ProviderError> {
        let today = self.today();
        let horizon = window.horizon(today);

        let mut upcoming: Vec<&Fixture> = FIXTURES
            .iter()
            .filter(|f| f.minute.is_none())
            .filter(|f| {
                let date = f.date(today);
                date >= today && date <= horizon
            })
            .collect();
        upcoming.sort_by(|a, b| a.day_offset.cmp(&b.day_offset).then(a.time.cmp(b.time)));

        Ok(upcoming.into_iter().map(|f| f.to_dto(today)).collect())
    }

    async fn teams(&self) -> Result<Vec<TeamInfo>, ProviderError> {
        Ok(TEAMS
            .iter()
            .map(|(name, _, league)| TeamInfo {
                id: name.to_lowercase().replace(' ', "-"),
                name: name.to_string(),
                logo: team_logo(name),
                league: league.to_string(),
                league_logo: league_logo(league),
            })
            .collect())
    }

    async fn team_stats(&self) -> Result<Vec<TeamStatsDto>, ProviderError> {
        let row = |team: &str, league: &str, record: [i32; 7], form: [&str; 5]| {
            let [mp, w, d, l, gf, ga, cs] = record;
            TeamStatsDto {
                team_name: team.to_string(),
                league: league.to_string(),
                mp,
                w,
                d,
                l,
                gf,
                ga,
                cs,
                form: form.iter().map(|r| r.to_string()).collect(),
                logo: team_logo(team),
                league_logo: league_logo(league),
            }
        };

        Ok(vec![
            row("Manchester City", "Premier League", [38, 29, 5, 4, 94, 26, 18], ["W", "W", "W", "D", "W"]),
            row("Real Madrid", "La Liga", [38, 28, 6, 4, 89, 32, 16], ["W", "W", "D", "W", "L"]),
            row("Liverpool", "Premier League", [38, 26, 8, 4, 85, 34, 14], ["D", "W", "W", "W", "W"]),
            row("Bayern Munich", "Bundesliga", [34, 25, 4, 5, 92, 38, 12], ["W", "L", "W", "W", "W"]),
            row("Barcelona", "La Liga", [38, 24, 7, 7, 78, 40, 13], ["W", "D", "L", "W", "W"]),
        ])
    }

    async fn player_stats(&self) -> Result<Vec<PlayerStatsDto>, ProviderError> {
        let row = |id: &str, name: &str, position: &str, team: &str, league: &str, numbers: [i32; 6]| {
            let [matches, goals, assists, yellow_cards, red_cards, minutes_played] = numbers;
            PlayerStatsDto {
                id: id.to_string(),
                name: name.to_string(),
                position: position.to_string(),
                team: team.to_string(),
                team_logo: team_logo(team),
                league: league.to_string(),
                league_logo: league_logo(league),
                matches,
                goals,
                assists,
                yellow_cards,
                red_cards,
                minutes_played,
            }
        };

        Ok(vec![
            row("p1", "Erling Haaland", "ST", "Manchester City", "Premier League", [35, 36, 8, 4, 0, 3050]),
            row("p2", "Kylian Mbappé", "ST", "PSG", "Ligue 1", [34, 27, 6, 3, 0, 2980]),
            row("p3", "Vinicius Jr", "LW", "Real Madrid", "La Liga", [33, 15, 9, 5, 1, 2850]),
            row("p4", "Mohamed Salah", "RW", "Liverpool", "Premier League", [37, 19, 12, 2, 0, 3240]),
            row("p5", "Robert Lewandowski", "ST", "Barcelona", "La Liga", [34, 23, 7, 3, 0, 3060]),
        ])
    }

    async fn league_stats(&self) -> Result<Vec<LeagueStatsDto>, ProviderError> {
        let row = |name: &str, teams: i32, goals_per_match: f64, avg_cards: f64, scorer: (&str, i32)| {
            LeagueStatsDto {
                id: name.to_lowercase().replace(' ', "-"),
                name: name.to_string(),
                logo: league_logo(name),
                region: region_of(name).to_string(),
                teams,
                matches: FIXTURES.iter().filter(|f| f.tournament == name).count() as i32,
                goals_per_match,
                avg_cards,
                top_scorer: TopScorer {
                    name: scorer.0.to_string(),
                    goals: scorer.1,
                },
            }
        };

        Ok(vec![
            row("Premier League", 20, 2.85, 3.6, ("Erling Haaland", 36)),
            row("La Liga", 20, 2.55, 4.9, ("Robert Lewandowski", 23)),
            row("Champions League", 32, 3.05, 3.8, ("Erling Haaland", 12)),
            row("Serie A", 20, 2.6, 4.4, ("Lautaro Martinez", 24)),
            row("Bundesliga", 18, 3.15, 3.5, ("Harry Kane", 36)),
        ])
    }
}
