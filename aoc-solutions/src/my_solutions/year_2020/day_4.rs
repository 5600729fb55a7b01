use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use rustc_hash::FxHashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 4, tags = ["2020", "easy", "validation"])]
pub struct Solver;

/// Every field but `cid`, which is optional
const REQUIRED: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];
const EYE_COLORS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

/// Field patterns that are not plain year ranges
#[derive(Debug)]
pub struct Rules {
    height: Regex,
    hair: Regex,
    passport_id: Regex,
}

impl Rules {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            height: Regex::new(r"^(\d+)(cm|in)$")?,
            hair: Regex::new(r"^#[0-9a-f]{6}$")?,
            passport_id: Regex::new(r"^\d{9}$")?,
        })
    }

    fn field_valid(&self, key: &str, value: &str) -> bool {
        let year_in = |min: u32, max: u32| {
            value.len() == 4 && value.parse().is_ok_and(|y: u32| (min..=max).contains(&y))
        };
        match key {
            "byr" => year_in(1920, 2002),
            "iyr" => year_in(2010, 2020),
            "eyr" => year_in(2020, 2030),
            "hgt" => self.height.captures(value).is_some_and(|caps| {
                let range = if &caps[2] == "cm" { 150..=193 } else { 59..=76 };
                caps[1].parse().is_ok_and(|h: u32| range.contains(&h))
            }),
            "hcl" => self.hair.is_match(value),
            "ecl" => EYE_COLORS.contains(&value),
            "pid" => self.passport_id.is_match(value),
            _ => true,
        }
    }
}

pub type Passport<'a> = FxHashMap<&'a str, &'a str>;

#[derive(Debug)]
pub struct Batch<'a> {
    passports: Vec<Passport<'a>>,
    rules: Rules,
}

impl AocParser for Solver {
    type SharedData<'a> = Batch<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut passports = vec![Passport::default()];
        for (idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                if passports.last().is_some_and(|p| !p.is_empty()) {
                    passports.push(Passport::default());
                }
                continue;
            }
            for entry in line.split_whitespace() {
                let (key, value) = entry
                    .split_once(':')
                    .ok_or_else(|| ParseError::at_line(idx + 1, format!("expected key:value, got {entry:?}")))?;
                if let Some(passport) = passports.last_mut() {
                    passport.insert(key, value);
                }
            }
        }
        passports.retain(|p| !p.is_empty());
        let rules = Rules::new().map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Ok(Batch { passports, rules })
    }
}

fn has_required(passport: &Passport<'_>) -> bool {
    REQUIRED.iter().all(|key| passport.contains_key(key))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.passports.iter().filter(|p| has_required(p)).count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let rules = &shared.rules;
        let count = shared
            .passports
            .iter()
            .filter(|p| has_required(p) && p.iter().all(|(key, value)| rules.field_valid(key, value)))
            .count();
        Ok(count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;

    const EXAMPLE: &str = "\
ecl:gry pid:860033327 eyr:2020 hcl:#fffffd
byr:1937 iyr:2017 cid:147 hgt:183cm

iyr:2013 ecl:amb cid:350 eyr:2023 pid:028048884
hcl:#cfa07d byr:1929

hcl:#ae17e1 iyr:2013
eyr:2024
ecl:brn pid:760753108 byr:1931
hgt:179cm

hcl:#cfa07d eyr:2025 pid:166559648
iyr:2011 ecl:brn hgt:59in
";

    const INVALID: &str = "\
eyr:1972 cid:100
hcl:#18171d ecl:amb hgt:170 pid:186cm iyr:2018 byr:1926

iyr:2019
hcl:#602927 eyr:1967 hgt:170cm
ecl:grn pid:012533040 byr:1946

hcl:dab227 iyr:2012
ecl:brn hgt:182cm pid:021572410 eyr:2020 byr:1992 cid:277

hgt:59cm ecl:zzz
eyr:2038 hcl:74454a iyr:2023
pid:3556412378 byr:2007
";

    const VALID: &str = "\
pid:087499704 hgt:74in ecl:grn iyr:2012 eyr:2030 byr:1980
hcl:#623a2f

eyr:2029 ecl:blu cid:129 byr:1989
iyr:2014 pid:896056539 hcl:#a97842 hgt:165cm

hcl:#888785
hgt:164cm byr:2001 iyr:2015 cid:88
pid:545766238 ecl:hzl
eyr:2022

iyr:2010 hgt:158cm hcl:#b6652a ecl:blu byr:1944 eyr:2021 pid:093154719
";

    #[test]
    fn test_required_fields() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(shared.passports.len(), 4);
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "2");
    }

    #[test]
    fn test_field_validation() {
        let mut invalid = Solver::parse(INVALID).unwrap();
        assert_eq!(Solver::solve_part(&mut invalid, 2).unwrap(), "0");
        let mut valid = Solver::parse(VALID).unwrap();
        assert_eq!(Solver::solve_part(&mut valid, 2).unwrap(), "4");
    }

    #[test]
    fn test_single_fields() {
        let rules = Rules::new().unwrap();
        assert!(rules.field_valid("byr", "2002"));
        assert!(!rules.field_valid("byr", "2003"));
        assert!(!rules.field_valid("byr", "02002"));
        assert!(rules.field_valid("hgt", "60in"));
        assert!(rules.field_valid("hgt", "190cm"));
        assert!(!rules.field_valid("hgt", "190in"));
        assert!(!rules.field_valid("hgt", "190"));
        assert!(rules.field_valid("hcl", "#123abc"));
        assert!(!rules.field_valid("hcl", "#123abz"));
        assert!(!rules.field_valid("hcl", "123abc"));
        assert!(rules.field_valid("ecl", "brn"));
        assert!(!rules.field_valid("ecl", "wat"));
        assert!(rules.field_valid("pid", "000000001"));
        assert!(!rules.field_valid("pid", "0123456789"));
    }

    #[test]
    fn test_rejects_bare_word() {
        assert!(Solver::parse("byr:1999 oops\n").is_err());
    }
}
